//! Parameters carried in the query string of a direct (`text/html`) upload.

use url::form_urlencoded;

use crate::cgi::params::{Applied, ParameterRegistry, Settings};

/// Decode `query` as `application/x-www-form-urlencoded` pairs and apply each
/// one through `registry`. Returns how many pairs changed the settings.
pub fn apply_query_string(
    query: &str,
    registry: &ParameterRegistry<'_>,
    settings: &mut Settings,
) -> usize {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(name, value)| {
            matches!(
                registry.apply(settings, name.as_bytes(), value.as_bytes()),
                Applied::Set(_)
            )
        })
        .count()
}
