//! Event dispatcher.
//!
//! Maps each [`Action`] to its session mutation, settings write-through and
//! capability side effect. Capability failures become notices and leave the
//! session alone; preference write failures propagate.

use tracing::{debug, info, warn};

use crate::action::Action;
use crate::capability::{locate, Capabilities, SharePayload};
use crate::error::Result;
use crate::links::map_link;
use crate::notice::Notice;
use crate::prefs::PreferenceStore;
use crate::session::Session;
use crate::settings::Settings;

/// Title and text of the share sheet payload for a location.
pub const SHARE_LOCATION_TITLE: &str = "My current location";

/// What the caller should do after an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Render the session again.
    pub rerender: bool,
    /// Show this notice.
    pub notice: Option<Notice>,
}

/// Apply `action` to the session.
///
/// Actions that change state ask for a re-render; copy and share actions
/// only report a notice. Settings changes reach the session only after the
/// store accepted them.
///
/// # Errors
///
/// Returns an error if persisting settings fails. Capability failures are
/// reported through [`Outcome::notice`] instead.
pub async fn dispatch(
    session: &mut Session,
    prefs: &mut impl PreferenceStore,
    capabilities: &Capabilities,
    action: Action,
) -> Result<Outcome> {
    debug!(action = action.tag(), "Dispatching");
    let rerender = !action.is_fire_and_forget();

    let notice = match action {
        Action::OpenScenario { id } => {
            if session.open_scenario(&id) {
                session.settings().save(prefs)?;
            }
            None
        }
        Action::GoHome => {
            session.go_home();
            None
        }
        Action::SwitchTab { tab } => {
            session.set_tab(tab);
            None
        }
        Action::SaveContact { name, phone } => {
            update_settings(session, prefs, |settings| {
                settings.contact_name = trimmed(name.as_deref());
                settings.contact_phone = trimmed(phone.as_deref());
            })?;
            info!("Trusted contact saved");
            Some(Notice::ContactSaved)
        }
        Action::ClearContact => {
            update_settings(session, prefs, |settings| {
                settings.contact_name.clear();
                settings.contact_phone.clear();
            })?;
            info!("Trusted contact cleared");
            None
        }
        Action::ToggleLargeText => {
            update_settings(session, prefs, |settings| {
                settings.large_text = !settings.large_text;
            })?;
            None
        }
        Action::ToggleHighContrast => {
            update_settings(session, prefs, |settings| {
                settings.high_contrast = !settings.high_contrast;
            })?;
            None
        }
        Action::CopyLine { text } => Some(copy(capabilities, &text).await),
        Action::CopyAllSay => match session.active_scenario() {
            Some(scenario) => {
                let text = scenario.say_this_text();
                Some(copy(capabilities, &text).await)
            }
            None => {
                debug!("No active scenario to copy from");
                None
            }
        },
        Action::ShareLocation => share_location(capabilities).await,
    };

    session.normalize();
    Ok(Outcome { rerender, notice })
}

fn trimmed(input: Option<&str>) -> String {
    input.map(str::trim).unwrap_or_default().to_string()
}

/// Apply `change` to a copy of the settings, persist it, then adopt it.
fn update_settings(
    session: &mut Session,
    prefs: &mut impl PreferenceStore,
    change: impl FnOnce(&mut Settings),
) -> Result<()> {
    let mut settings = session.settings().clone();
    change(&mut settings);
    settings.save(prefs)?;
    *session.settings_mut() = settings;
    Ok(())
}

/// Copy `text`, mapping the result to a notice.
async fn copy(capabilities: &Capabilities, text: &str) -> Notice {
    match capabilities.copy_text(text).await {
        Ok(()) => Notice::Copied,
        Err(e) => {
            warn!("Copy failed: {e}");
            Notice::CopyFailed
        }
    }
}

/// Share a map link to the current position.
///
/// Tries the share sheet first and falls back to the clipboard. A
/// successful share needs no notice.
async fn share_location(capabilities: &Capabilities) -> Option<Notice> {
    let Some(provider) = capabilities.geolocation.provider() else {
        return Some(Notice::GeolocationUnavailable);
    };

    let coords = match locate(&**provider, capabilities.geolocation_timeout).await {
        Ok(coords) => coords,
        Err(e) => {
            warn!("Unable to get position: {e}");
            return Some(Notice::LocationFailed);
        }
    };
    let url = map_link(coords);

    if let Some(surface) = capabilities.share.provider() {
        let payload = SharePayload {
            title: SHARE_LOCATION_TITLE.to_string(),
            text: SHARE_LOCATION_TITLE.to_string(),
            url: url.clone(),
        };
        match surface.share(&payload).await {
            Ok(()) => {
                debug!("Location shared");
                return None;
            }
            Err(e) => debug!("Share sheet failed, copying instead: {e}"),
        }
    }

    Some(copy(capabilities, &url).await)
}
