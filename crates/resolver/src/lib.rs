pub mod api;
pub mod coalesce;
pub mod config;
pub mod resolver;

pub use api::{HttpProfileApi, ProfileApi};
pub use resolver::RoleResolver;

/// Resolver wired to the REST backend, as used by the app.
pub type HttpRoleResolver = RoleResolver<HttpProfileApi>;

/// Build the production resolver from `config.toml` and the environment.
pub fn http_resolver() -> HttpRoleResolver {
    let config = config::load_config();
    RoleResolver::new(HttpProfileApi::new(&config.api), config)
}
