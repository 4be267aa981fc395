#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WallsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct PassagesCount(pub usize);
