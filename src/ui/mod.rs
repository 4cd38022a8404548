pub mod layout;
mod confirm;
mod picker;
mod slide;

pub use confirm::draw_quit_confirmation;
pub use layout::{calculate_presentation_chunks, PresentationLayout};
pub use picker::draw_slide_picker;
pub use slide::draw_presentation;
