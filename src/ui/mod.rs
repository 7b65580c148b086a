mod ui_login_system;

pub use ui_login_system::ui_login_system;
