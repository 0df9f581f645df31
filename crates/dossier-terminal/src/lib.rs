//! Answer rendering and terminal styling for Dossier.

pub mod answer;
pub mod spinner;
pub mod style;

pub use answer::render_answer;
pub use spinner::Spinner;
