use derive_more::{AsRef, Deref, Display, From, Into};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// Viewports at or below this width count as small screens.
pub const SMALL_VIEWPORT_MAX_WIDTH: f64 = 768.0;

/// Free-form platform identifier (user agent, desktop session name, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Display, Deref, From, Into, AsRef)]
pub struct DeviceIdentifier(String);

crate::impl_string_newtype!(DeviceIdentifier);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum MobileSignature {
    Android,
    WebOs,
    IPhone,
    IPad,
    IPod,
    BlackBerry,
    IeMobile,
    #[strum(serialize = "opera mini")]
    OperaMini,
    Phosh,
    #[strum(serialize = "plasma-mobile")]
    PlasmaMobile,
}

#[derive(Debug, Clone, Default)]
pub struct DeviceProfile {
    pub has_touch: bool,
    pub viewport_width: f64,
    pub identifier: DeviceIdentifier,
}

impl DeviceProfile {
    pub fn matched_signature(&self) -> Option<MobileSignature> {
        let id = self.identifier.to_lowercase();
        MobileSignature::iter().find(|sig| id.contains(sig.as_ref()))
    }

    pub fn is_small_touch_screen(&self) -> bool {
        self.has_touch && self.viewport_width <= SMALL_VIEWPORT_MAX_WIDTH
    }

    pub fn is_mobile(&self) -> bool {
        self.is_small_touch_screen() || self.matched_signature().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(has_touch: bool, viewport_width: f64, identifier: &str) -> DeviceProfile {
        DeviceProfile {
            has_touch,
            viewport_width,
            identifier: DeviceIdentifier::new(identifier),
        }
    }

    #[test]
    fn test_desktop_is_not_mobile() {
        assert!(!profile(false, 1920.0, "GNOME").is_mobile());
        // touch laptop with a large screen keeps the cursor
        assert!(!profile(true, 1920.0, "KDE").is_mobile());
        // narrow window without touch keeps it too
        assert!(!profile(false, 600.0, "sway").is_mobile());
    }

    #[test]
    fn test_small_touch_screen_is_mobile() {
        assert!(profile(true, 768.0, "").is_mobile());
        assert!(profile(true, 390.0, "").is_mobile());
    }

    #[test]
    fn test_identifier_signatures() {
        let cases = [
            ("Mozilla/5.0 (Linux; Android 14)", MobileSignature::Android),
            ("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", MobileSignature::IPhone),
            ("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)", MobileSignature::OperaMini),
            ("Phosh:GNOME", MobileSignature::Phosh),
            ("KDE:plasma-mobile", MobileSignature::PlasmaMobile),
            ("Mozilla/5.0 (webOS/1.4.0)", MobileSignature::WebOs),
        ];

        for (id, expected) in cases {
            let p = profile(false, 1920.0, id);
            assert_eq!(p.matched_signature(), Some(expected), "{id}");
            assert!(p.is_mobile());
        }
    }
}
