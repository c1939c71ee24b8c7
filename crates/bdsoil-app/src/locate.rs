//! Location entry from the command line.
//!
//! Thin drivers over [`GeoResolver`]: one-shot GPS lookup, network
//! location, an interactive mode that feeds stdin lines as field edits,
//! and map-bridge messages.

use std::io::Write;

use bdsoil_geo::{
    ForwardGeocoder, GeoResolver, LocationField, ResolveState, ReverseGeocoder,
    receive_map_message,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::AppError;

fn print_field<W: Write>(field: &LocationField, out: &mut W) -> Result<(), AppError> {
    writeln!(out, "GPS: {}", field.gps_text)?;
    writeln!(out, "Location: {}", field.address)?;
    Ok(())
}

/// Resolve GPS text to an address now.
pub async fn from_gps<R, F, W>(
    resolver: &GeoResolver<R, F>,
    gps: &str,
    out: &mut W,
) -> Result<(), AppError>
where
    R: ReverseGeocoder,
    F: ForwardGeocoder,
    W: Write,
{
    let field = resolver.resolve_text(gps).await?;
    print_field(&field, out)
}

/// Fill the location from the caller's network position.
pub async fn current<R, F, W>(resolver: &GeoResolver<R, F>, out: &mut W) -> Result<(), AppError>
where
    R: ReverseGeocoder,
    F: ForwardGeocoder,
    W: Write,
{
    let field = resolver.use_current_location().await?;
    print_field(&field, out)
}

/// Feed each input line to the resolver as an edit of the GPS field, then
/// wait for the last pending resolution and print the field.
///
/// Lines arriving within the debounce period of each other collapse into
/// a single lookup of the last one.
pub async fn interactive<R, F, I, W>(
    resolver: &GeoResolver<R, F>,
    input: I,
    out: &mut W,
) -> Result<(), AppError>
where
    R: ReverseGeocoder,
    F: ForwardGeocoder,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if resolver.edit(&line) == ResolveState::Invalid && !line.trim().is_empty() {
            writeln!(out, "Invalid GPS format: {line}")?;
        }
    }
    resolver.settle().await;

    let field = resolver.field();
    if field.state == ResolveState::Resolved {
        print_field(&field, out)
    } else {
        writeln!(out, "No location resolved.")?;
        Ok(())
    }
}

/// Apply a map-bridge message. Malformed messages are ignored.
pub fn map_message<R, F, W>(
    resolver: &GeoResolver<R, F>,
    raw: &str,
    out: &mut W,
) -> Result<(), AppError>
where
    R: ReverseGeocoder,
    F: ForwardGeocoder,
    W: Write,
{
    match receive_map_message(raw) {
        Some(location) => print_field(&resolver.accept_map_pick(&location), out),
        None => {
            writeln!(out, "Map message ignored.")?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::{Arc, Mutex};

    use bdsoil_geo::{GeoError, ResolverSettings};
    use bdsoil_types::GeoLocation;

    use super::*;

    #[derive(Clone, Default)]
    struct Reverse {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl ReverseGeocoder for Reverse {
        fn name(&self) -> &'static str {
            "test-reverse"
        }

        async fn reverse(&self, lat: f64, lng: f64) -> Result<String, GeoError> {
            let key = format!("{lat}, {lng}");
            self.calls.lock().unwrap().push(key.clone());
            Ok(format!("Address at {key}"))
        }
    }

    struct Forward;

    impl ForwardGeocoder for Forward {
        fn name(&self) -> &'static str {
            "test-forward"
        }

        async fn locate(&self) -> Result<GeoLocation, GeoError> {
            Ok(GeoLocation {
                lat: 23.81,
                lng: 90.41,
                address: "Dhaka, Dhaka Division, Bangladesh".to_owned(),
            })
        }
    }

    fn resolver(reverse: Reverse) -> GeoResolver<Reverse, Forward> {
        GeoResolver::new(reverse, vec![Forward], ResolverSettings::default())
    }

    fn sink() -> Vec<u8> {
        Vec::new()
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn interactive_resolves_only_the_last_edit() {
        let reverse = Reverse::default();
        let resolver = resolver(reverse.clone());
        let input: &[u8] = b"23.8\n23.81, 90.4\nnot gps\n23.81, 90.41\n";

        let mut out = sink();
        interactive(&resolver, input, &mut out).await.unwrap();

        assert_eq!(*reverse.calls.lock().unwrap(), ["23.81, 90.41"]);
        let shown = text(out);
        assert!(shown.contains("Invalid GPS format: 23.8\n"));
        assert!(shown.contains("Invalid GPS format: not gps\n"));
        assert!(shown.ends_with("GPS: 23.81, 90.41\nLocation: Address at 23.81, 90.41\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn interactive_ending_invalid_resolves_nothing() {
        let reverse = Reverse::default();
        let resolver = resolver(reverse.clone());
        let input: &[u8] = b"23.81, 90.41\n23.81,\n";

        let mut out = sink();
        interactive(&resolver, input, &mut out).await.unwrap();

        assert!(reverse.calls.lock().unwrap().is_empty());
        assert!(text(out).ends_with("No location resolved.\n"));
    }

    #[tokio::test]
    async fn current_location_fills_both_fields() {
        let resolver = resolver(Reverse::default());
        let mut out = sink();
        current(&resolver, &mut out).await.unwrap();
        assert_eq!(
            text(out),
            "GPS: 23.81, 90.41\nLocation: Dhaka, Dhaka Division, Bangladesh\n"
        );
    }

    #[tokio::test]
    async fn gps_lookup_rejects_bad_text() {
        let resolver = resolver(Reverse::default());
        let result = from_gps(&resolver, "north", &mut sink()).await;
        assert!(matches!(result, Err(AppError::Geo(GeoError::InvalidCoordinates(_)))));
    }

    #[tokio::test]
    async fn map_messages() {
        let resolver = resolver(Reverse::default());

        let mut out = sink();
        map_message(
            &resolver,
            r#"{"lat": 24.3636, "lng": 88.6241, "address": "Rajshahi"}"#,
            &mut out,
        )
        .unwrap();
        assert_eq!(text(out), "GPS: 24.363600, 88.624100\nLocation: Rajshahi\n");

        let mut out = sink();
        map_message(&resolver, "{broken", &mut out).unwrap();
        assert_eq!(text(out), "Map message ignored.\n");
    }
}
