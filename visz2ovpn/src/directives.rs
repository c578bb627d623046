use thiserror::Error;
use visz_bundle::Directives;

const VISCOSITY_DIRECTIVES: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/directives/viscosity.toml"
));

/// Errors returned when the directives TOML cannot be used.
#[derive(Debug, Error)]
pub enum DirectivesError {
    #[error("failed to parse directives")]
    Parse(#[source] toml::de::Error),
    #[error("directives set an empty '{0}' marker")]
    EmptyMarker(&'static str),
}

/// Line markers for Viscosity exports, read from the bundled `viscosity.toml`.
pub fn builtin_directives() -> Result<Directives, DirectivesError> {
    parse_directives(VISCOSITY_DIRECTIVES)
}

fn parse_directives(raw: &str) -> Result<Directives, DirectivesError> {
    let parsed: Directives = toml::from_str(raw).map_err(DirectivesError::Parse)?;

    // An empty marker would match every config line.
    let markers = [
        ("tls_crypt", &parsed.tls_crypt),
        ("pkcs12", &parsed.pkcs12),
        ("banner", &parsed.banner),
    ];
    if let Some((field, _)) = markers.iter().find(|(_, marker)| marker.is_empty()) {
        return Err(DirectivesError::EmptyMarker(field));
    }

    Ok(parsed)
}
