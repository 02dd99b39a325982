mod components;
mod view;

pub(crate) use view::{UiContext, draw};
