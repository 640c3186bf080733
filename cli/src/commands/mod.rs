pub(crate) mod echo;
pub(crate) mod periods;
pub(crate) mod render;
