//! Log in to a site with a Foursquare account over OAuth2.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod models;
