mod banners;
mod benefits;
mod fields;
mod footer;
mod layout;
mod overlay;

pub(crate) use banners::{render_banners, wrapped_banner_height};
pub(crate) use benefits::render_benefits;
pub(crate) use fields::render_fields;
pub(crate) use footer::render_footer;
pub(crate) use overlay::render_loading_overlay;
