pub mod bindings;
pub mod config;
pub mod content;
pub mod controller;
pub mod evaluator;
pub mod feedback;
pub mod final_quiz;
pub mod keys;
pub mod logger;
pub mod models;
pub mod progress;
pub mod pronunciation;
pub mod slides;
pub mod ui;
pub mod utils;
pub mod view_state;


// Re-exports for convenience
pub use bindings::{Element, ElementId, Handler, HandlerRegistry};
pub use config::Config;
pub use content::{bundled_deck, load_deck, ContentError};
pub use controller::{PresentationController, TextEdit};
pub use evaluator::{evaluate_blanks, evaluate_choice, HintTable};
pub use feedback::{Feedback, FeedbackScheduler};
pub use final_quiz::{FinalQuizScorer, ScoreTier};
pub use keys::{handle_picker_input, handle_presentation_input, handle_quit_confirm_input};
pub use models::{AppState, Deck, Exercise, Slide};
pub use progress::ProgressTracker;
pub use slides::SlideModel;
pub use ui::{draw_presentation, draw_quit_confirmation, draw_slide_picker};
