//! Page components for the application
//!
//! This module contains the views the route table loads on demand.
//! Each page is only constructed when its route is first navigated to.

pub mod authorisation;
pub mod home;
pub mod not_found;
pub mod tutorial;

pub use authorisation::AuthorisationView;
pub use home::HomeView;
pub use not_found::NotFoundView;
pub use tutorial::TutorialView;
