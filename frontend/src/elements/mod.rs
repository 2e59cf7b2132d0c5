use std::rc::Rc;

use shared::controller::Controller;

use crate::timers::BrowserTimers;

pub mod app_banner;
pub mod app_dashboard;
pub mod app_login;
pub mod app_root;
mod form;

pub type App<I, D> = Rc<Controller<I, D, BrowserTimers>>;
