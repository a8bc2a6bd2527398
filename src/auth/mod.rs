pub mod controller;
pub mod profile_mapper;
pub mod provider;
pub mod state_store;
pub mod user_authenticator;

pub use controller::AuthFlowController;
pub use provider::{FoursquareClient, FoursquareNetwork, ProviderClient, ProviderFactory};
pub use state_store::StateStore;
pub use user_authenticator::{InMemoryUserManager, UserAuthenticator};
