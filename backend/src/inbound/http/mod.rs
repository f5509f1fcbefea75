//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate requests into driving-port calls on [`state::HttpState`]
//! and render domain values through the projections in [`schemas`].

pub mod accounts;
pub mod auth;
pub mod capsule_contents;
pub mod capsules;
pub mod discussions;
pub mod error;
pub mod health;
pub mod lookups;
pub mod predictions;
pub mod schemas;
pub mod state;
pub mod stories;
#[cfg(test)]
pub mod test_utils;
pub mod timeline;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every resource route, plus the JSON and query extractor
/// configuration, on `cfg`.
///
/// The caller supplies [`state::HttpState`] and [`health::HealthState`] as
/// app data.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use mockable::DefaultClock;
/// use timecapsule::domain::ports::Repositories;
/// use timecapsule::inbound::http::health::HealthState;
/// use timecapsule::inbound::http::state::HttpState;
/// use timecapsule::inbound::http::configure;
/// use timecapsule::outbound::memory::InMemoryStore;
///
/// let repositories = Repositories::shared(Arc::new(InMemoryStore::new()));
/// let state = HttpState::from_repositories(&repositories, Arc::new(DefaultClock));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .app_data(web::Data::new(HealthState::new()))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .service(accounts::register)
        .service(accounts::login)
        .service(capsules::list_capsules)
        .service(capsules::create_capsule)
        .service(capsules::get_capsule)
        .service(capsules::update_capsule)
        .service(capsules::delete_capsule)
        .service(capsule_contents::list_capsule_contents)
        .service(capsule_contents::create_capsule_content)
        .service(capsule_contents::get_capsule_content)
        .service(capsule_contents::update_capsule_content)
        .service(capsule_contents::delete_capsule_content)
        .service(stories::list_story_nodes)
        .service(stories::create_story_node)
        .service(stories::get_story_node)
        .service(stories::update_story_node)
        .service(stories::delete_story_node)
        .service(stories::list_story_choices)
        .service(stories::create_story_choice)
        .service(stories::get_story_choice)
        .service(stories::update_story_choice)
        .service(stories::delete_story_choice)
        .service(predictions::prediction_statistics)
        .service(predictions::list_predictions)
        .service(predictions::create_prediction)
        .service(predictions::get_prediction)
        .service(predictions::update_prediction)
        .service(predictions::delete_prediction)
        .service(predictions::verify_prediction)
        .service(discussions::list_threads)
        .service(discussions::create_thread)
        .service(discussions::get_thread)
        .service(discussions::update_thread)
        .service(discussions::delete_thread)
        .service(discussions::list_comments)
        .service(discussions::create_comment)
        .service(discussions::get_comment)
        .service(discussions::update_comment)
        .service(discussions::delete_comment)
        .service(timeline::user_timeline)
        .service(timeline::timeline_statistics)
        .service(timeline::discovery_history)
        .service(lookups::list_capsule_statuses)
        .service(lookups::get_capsule_status)
        .service(lookups::list_capsule_types)
        .service(lookups::get_capsule_type)
        .service(lookups::list_verification_statuses)
        .service(lookups::get_verification_status)
        .service(lookups::list_content_types)
        .service(lookups::get_content_type)
        .service(health::ready)
        .service(health::live);
}
