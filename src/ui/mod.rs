pub mod charts;
pub mod dashboard;
pub mod dialogs;
pub mod export;
pub mod home;
pub mod panels;
