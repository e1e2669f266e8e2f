//! Profile page: display formatting and the inline editor.
//!
//! The editor keeps one pending update per field (empty string = nothing to
//! send), a set of fields currently marked invalid, and the profile image
//! state. The save button is enabled from those three pieces.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::notify::{NotificationKind, Notifier};
use crate::submit::{run_submission, Loader, LoaderPolicy, SubmitOutcome, Submitter};

pub const STATIC_IMAGE_DIR: &str = "/static/media/course_images";

/// Delay between a successful save and the page reload.
pub const RELOAD_DELAY: Duration = Duration::from_secs(5);

pub const ACCEPTED_SOCIAL_PLATFORMS: &[&str] = &[
    "instagram.com",
    "linkedin.com",
    "facebook.com",
    "x.com",
    "github.com",
];

const FULL_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static CENSOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{9})(\d{3})").expect("valid censor regex"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w\-\.]+@(?:[\w-]+\.)+[\w-]{2,3}$").expect("valid email regex")
});

static PROFILE_PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0+[0-9]{10,12}$").expect("valid phone regex"));

static SOCIAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https://)?(?:www\.)?(?:(?:instagram|x|facebook|github)\.com/|linkedin\.com/in/)[a-zA-Z0-9._]+/?$",
    )
    .expect("valid social regex")
});

/// Hide the three digits after the first nine.
pub fn censor_phone(number: &str) -> String {
    CENSOR_PATTERN.replace(number, "${1}***").into_owned()
}

/// Full label for an interest acronym.
pub fn interest_label(acronym: &str) -> Option<&'static str> {
    let label = match acronym {
        "IT" => "Information Technology (IT)",
        "EMP" => "Engineering, Math, and Physics (EMP)",
        "LNJ" => "Law and Justice (LNJ)",
        "HCS" => "History and Cultural Studies (HCS)",
        "SPE" => "Sport and Physical Education (SPE)",
        "SIS" => "Social and International Studies (SIS)",
        "HMB" => "Health, Medicine, and Biological Sciences (HMB)",
        "ENS" => "Environmental Studies and Sustainability (ENS)",
        _ => return None,
    };
    Some(label)
}

fn month_number(short: &str) -> Option<usize> {
    FULL_MONTHS
        .iter()
        .position(|m| m.get(..3) == Some(short))
        .map(|i| i + 1)
}

fn day_suffix(day: u32) -> &'static str {
    if day > 3 && day < 21 {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Split a server-rendered date like `"Jan. 5, 2000"` or `"March 5, 2000"`
/// into `(month, day, year)`.
fn split_display_date(text: &str) -> Option<(&str, &str, &str)> {
    let (day_month, year) = text.split_once(',')?;
    let (month, day) = day_month
        .split_once(". ")
        .or_else(|| day_month.split_once(' '))?;
    Some((month.trim(), day.trim(), year.trim()))
}

/// `"Jan. 5, 2000"` → `"January 5th, 2000"`. Month names longer than three
/// letters are kept as rendered.
pub fn format_birth_date(text: &str) -> Option<String> {
    let (month, day, year) = split_display_date(text)?;
    let day_number: u32 = day.parse().ok()?;
    let month_name = if month.len() > 3 {
        month.to_string()
    } else {
        FULL_MONTHS[month_number(month)? - 1].to_string()
    };
    Some(format!("{month_name} {day}{}, {year}", day_suffix(day_number)))
}

/// `"Jan. 5, 2020"` → `"5/01/2020"`.
pub fn format_joined_date(text: &str) -> Option<String> {
    let (month, day, year) = split_display_date(text)?;
    let number = month_number(month.get(..3)?)?;
    Some(format!("{day}/{number:02}/{year}"))
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn is_valid_profile_phone(value: &str) -> bool {
    PROFILE_PHONE_PATTERN.is_match(value)
}

/// Social links may be left empty.
pub fn is_valid_social_link(value: &str) -> bool {
    value.is_empty() || SOCIAL_PATTERN.is_match(value)
}

/// Link target for a stored social handle URL.
pub fn social_href(link: &str) -> String {
    if link.contains("https://") {
        link.to_string()
    } else {
        format!("https://{link}")
    }
}

/// Default avatar for a gender.
pub fn default_photo(gender: &str) -> String {
    if gender == "Male" {
        format!("{STATIC_IMAGE_DIR}/male-default-profile.jpg")
    } else {
        format!("{STATIC_IMAGE_DIR}/female-default-profile.jpg")
    }
}

/// SVG stroke geometry for the completion ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub circumference: f64,
    /// Stroke offset once the fill transition has finished
    pub offset: f64,
}

pub fn completion_ring(radius: f64, percent: f64) -> RingGeometry {
    let circumference = 2.0 * std::f64::consts::PI * radius;
    let offset = circumference - (percent.clamp(0.0, 100.0) / 100.0) * circumference;
    RingGeometry {
        circumference,
        offset,
    }
}

/// Inline-editable profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Nickname,
    Email,
    Phone,
    Address,
    Profession,
    Institution,
    Social,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Nickname,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Address,
        ProfileField::Profession,
        ProfileField::Institution,
        ProfileField::Social,
    ];

    /// Form key the backend expects.
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Nickname => "nickname",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Address => "address",
            ProfileField::Profession => "profession",
            ProfileField::Institution => "institution",
            ProfileField::Social => "social",
        }
    }

    fn title(self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    fn empty_message(self) -> String {
        match self {
            ProfileField::Social => "Social link cannot be empty".to_string(),
            other => format!("{} cannot be empty", other.title()),
        }
    }

    fn has_format(self) -> bool {
        matches!(
            self,
            ProfileField::Email | ProfileField::Phone | ProfileField::Social
        )
    }

    fn format_ok(self, value: &str) -> bool {
        match self {
            ProfileField::Email => is_valid_email(value),
            ProfileField::Phone => is_valid_profile_phone(value),
            ProfileField::Social => is_valid_social_link(value),
            _ => true,
        }
    }
}

/// What the server rendered for the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSnapshot {
    pub values: BTreeMap<ProfileField, String>,
    pub gender: String,
    /// Custom avatar URL; `None` means the default photo is shown
    pub image_url: Option<String>,
}

impl ProfileSnapshot {
    fn value(&self, field: ProfileField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Share of editable fields that are filled in, rounded down.
    pub fn completion_percent(&self) -> u8 {
        let filled = ProfileField::ALL
            .iter()
            .filter(|field| !self.value(**field).is_empty())
            .count();
        (filled * 100 / ProfileField::ALL.len()) as u8
    }

    /// Text shown while not editing: phone censored, empty as "None".
    pub fn display(&self, field: ProfileField) -> String {
        match self.value(field) {
            "" => "None".to_string(),
            value if field == ProfileField::Phone => censor_phone(value),
            value => value.to_string(),
        }
    }
}

/// Result of leaving an edited field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlurOutcome {
    /// Same as the stored value; nothing pending
    Unchanged,
    /// Value queued for saving
    Accepted,
    /// Field marked invalid and the user notified
    Rejected { message: String },
}

/// Pending profile image change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageUpdate {
    None,
    /// File name of an uploaded image confirmed with "Update"
    File(String),
    /// Revert to the default photo
    Default(String),
}

/// Inline profile editor state.
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    snapshot: ProfileSnapshot,
    updates: BTreeMap<ProfileField, String>,
    invalid: HashMap<ProfileField, bool>,
    editing: Option<ProfileField>,
    chosen_image: Option<String>,
    image: ImageUpdate,
    remove_clicks: u32,
    update_clicked: bool,
}

impl ProfileDraft {
    pub fn new(snapshot: ProfileSnapshot) -> Self {
        Self {
            snapshot,
            updates: ProfileField::ALL.iter().map(|f| (*f, String::new())).collect(),
            invalid: HashMap::new(),
            editing: None,
            chosen_image: None,
            image: ImageUpdate::None,
            remove_clicks: 0,
            update_clicked: false,
        }
    }

    pub fn snapshot(&self) -> &ProfileSnapshot {
        &self.snapshot
    }

    pub fn editing(&self) -> Option<ProfileField> {
        self.editing
    }

    pub fn is_invalid(&self, field: ProfileField) -> bool {
        self.invalid.get(&field).copied().unwrap_or(false)
    }

    pub fn any_invalid(&self) -> bool {
        self.invalid.values().any(|v| *v)
    }

    pub fn image_update(&self) -> &ImageUpdate {
        &self.image
    }

    /// Enter edit mode and return the value to prefill the input with.
    pub fn begin_edit(&mut self, field: ProfileField) -> String {
        self.editing = Some(field);
        self.snapshot.value(field).to_string()
    }

    /// Leave edit mode for `field` with the typed `input`.
    pub fn blur<N: Notifier + ?Sized>(
        &mut self,
        field: ProfileField,
        input: &str,
        notifier: &N,
    ) -> BlurOutcome {
        self.editing = None;

        if input == self.snapshot.value(field) {
            self.updates.insert(field, String::new());
            self.invalid.remove(&field);
            return BlurOutcome::Unchanged;
        }

        if field.has_format() && !field.format_ok(input) {
            let message = if field == ProfileField::Social {
                let recognized = ACCEPTED_SOCIAL_PLATFORMS.iter().any(|p| input.contains(p));
                if recognized {
                    "Invalid social link".to_string()
                } else {
                    "Platform not recognized".to_string()
                }
            } else if input.is_empty() {
                field.empty_message()
            } else {
                format!("Invalid {} format", field.key())
            };
            return self.reject(field, message, notifier);
        }

        if input.is_empty() {
            return self.reject(field, field.empty_message(), notifier);
        }

        self.updates.insert(field, input.to_string());
        self.invalid.insert(field, false);
        BlurOutcome::Accepted
    }

    fn reject<N: Notifier + ?Sized>(
        &mut self,
        field: ProfileField,
        message: String,
        notifier: &N,
    ) -> BlurOutcome {
        self.updates.insert(field, String::new());
        self.invalid.insert(field, true);
        notifier.notify(NotificationKind::Error, &message);
        BlurOutcome::Rejected { message }
    }

    /// A file was picked in the image input.
    pub fn choose_image(&mut self, file_name: impl Into<String>) {
        self.chosen_image = Some(file_name.into());
        if matches!(self.image, ImageUpdate::File(_)) {
            self.image = ImageUpdate::None;
        }
    }

    /// "Update" confirms the picked file.
    pub fn commit_image(&mut self) -> bool {
        let Some(file) = self.chosen_image.clone() else {
            return false;
        };
        self.update_clicked = true;
        self.image = ImageUpdate::File(file);
        true
    }

    /// "Remove" reverts to the default photo for the user's gender.
    pub fn remove_image(&mut self) {
        if matches!(self.image, ImageUpdate::File(_)) {
            self.remove_clicks += 1;
        }
        self.remove_clicks += 1;
        self.chosen_image = None;
        self.image = ImageUpdate::Default(default_photo(&self.snapshot.gender));
    }

    /// Whether "Save" is clickable.
    ///
    /// Known issue kept from the page this replaces: a removal back to the
    /// default photo only counts as "no change" when "Update" was clicked
    /// earlier in the session, so removing a photo without ever updating
    /// one still enables saving.
    pub fn save_enabled(&self) -> bool {
        let default = default_photo(&self.snapshot.gender);
        let image_unchanged = match &self.image {
            ImageUpdate::None => true,
            ImageUpdate::File(_) => false,
            ImageUpdate::Default(path) => {
                *path == default && self.remove_clicks > 0 && self.update_clicked
            }
        };
        let no_changes = image_unchanged && self.updates.values().all(String::is_empty);
        !(no_changes || self.any_invalid())
    }

    /// Fold a successful save into the snapshot and start over, the way a
    /// page reload would.
    pub fn apply_saved(&mut self) {
        let mut snapshot = self.snapshot.clone();
        for (field, value) in &self.updates {
            if !value.is_empty() {
                snapshot.values.insert(*field, value.clone());
            }
        }
        match &self.image {
            ImageUpdate::None => {}
            ImageUpdate::File(name) => snapshot.image_url = Some(name.clone()),
            ImageUpdate::Default(_) => snapshot.image_url = None,
        }
        *self = Self::new(snapshot);
    }

    /// Fields to send; unchanged fields are sent as empty strings.
    pub fn payload(&self) -> BTreeMap<String, String> {
        let mut payload: BTreeMap<String, String> = self
            .updates
            .iter()
            .map(|(field, value)| (field.key().to_string(), value.clone()))
            .collect();
        let image = match &self.image {
            ImageUpdate::None => String::new(),
            ImageUpdate::File(name) | ImageUpdate::Default(name) => name.clone(),
        };
        payload.insert("imageFile".to_string(), image);
        payload
    }
}

/// Result of pressing "Save".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSaveOutcome {
    /// An invalid field blocked the request
    Blocked,
    /// Saved; reload the page after the delay
    Saved { reload_after: Duration },
    Failed { message: String },
}

/// Loader shown while the profile is saved.
pub fn update_loader() -> Loader {
    Loader::new(
        vec!["Updating your profile".to_string()],
        Duration::from_secs(3),
        LoaderPolicy::FixedSequence,
    )
}

/// Save the draft once, reporting success or failure via `notifier`.
pub async fn save_profile<S, N>(
    draft: &ProfileDraft,
    submitter: &S,
    notifier: &N,
    loader: &Loader,
) -> ProfileSaveOutcome
where
    S: Submitter,
    N: Notifier + ?Sized,
{
    if draft.any_invalid() {
        notifier.notify(NotificationKind::Error, "Empty field cannot be accepted");
        return ProfileSaveOutcome::Blocked;
    }

    match run_submission(draft.payload(), submitter, notifier, loader).await {
        SubmitOutcome::Completed { .. } => {
            notifier.notify(NotificationKind::Success, "Profile updated successfully");
            ProfileSaveOutcome::Saved {
                reload_after: RELOAD_DELAY,
            }
        }
        SubmitOutcome::Failed { message } => ProfileSaveOutcome::Failed { message },
    }
}
