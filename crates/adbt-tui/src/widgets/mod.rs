//! Custom widget components

mod confirm_dialog;
mod form_dialog;
mod header;
pub mod help_bar;
pub mod modal_overlay;
pub mod screens;
mod search_line;
mod toast;

pub use confirm_dialog::ConfirmDialog;
pub use form_dialog::FormDialog;
pub use header::MainHeader;
pub use help_bar::{HelpBar, Hints};
pub use search_line::SearchLine;
pub use toast::ToastView;
