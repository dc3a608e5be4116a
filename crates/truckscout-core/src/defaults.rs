//! Centralized default constants for truckscout.
//!
//! Every crate reads its fixed display encodings, prompt texts and service
//! defaults from here instead of defining its own magic values.

// =============================================================================
// REVENUE
// =============================================================================

/// Lower clamp for logistics marker revenue.
pub const REVENUE_CAP_MIN: f64 = 5.0;

/// Upper clamp for logistics marker revenue.
pub const REVENUE_CAP_MAX: f64 = 30.0;

/// Capped revenue assigned to every dealership row.
pub const DEALERSHIP_CAPPED_REVENUE: f64 = 12.0;

/// Suffix appended to a present revenue figure.
pub const REVENUE_SUFFIX: &str = "Million €";

/// Formatted revenue for a logistics row with no (or zero) revenue.
pub const REVENUE_NOT_AVAILABLE: &str = "N/A";

/// Formatted revenue for dealership rows, which skip the formatter.
pub const DEALERSHIP_REVENUE_TEXT: &str = "Not applicable";

// =============================================================================
// MARKER ENCODING
// =============================================================================

/// Lower end of the revenue domain mapped onto marker sizes.
///
/// Wider than the clamp range, so capped values never reach the top size.
pub const SIZE_DOMAIN_MIN: f64 = 4.0;

/// Upper end of the revenue domain mapped onto marker sizes.
pub const SIZE_DOMAIN_MAX: f64 = 40.0;

/// Smallest marker size.
pub const MARKER_SIZE_MIN: f64 = 4.0;

/// Largest marker size.
pub const MARKER_SIZE_MAX: f64 = 20.0;

/// Marker color: logistics company whose fleet includes the target brand.
pub const COLOR_FLEET_INCLUDES_BRAND: &str = "rgb(179,205,227)";

/// Marker color: logistics company whose fleet likely excludes the brand.
pub const COLOR_FLEET_EXCLUDES_BRAND: &str = "rgb(251,180,174)";

/// Marker color: logistics company without fleet brand information.
pub const COLOR_NO_BRAND_INFORMATION: &str = "grey";

/// Marker color: dealership.
pub const COLOR_DEALERSHIP: &str = "rgb(102,102,102)";

/// Marker symbol for logistics layers.
pub const SYMBOL_CIRCLE: &str = "circle";

/// Marker symbol for the dealership layer.
pub const SYMBOL_SQUARE: &str = "square";

// =============================================================================
// MAP VIEW
// =============================================================================

/// Initial map zoom level.
pub const MAP_ZOOM: f64 = 6.6;

/// Base map style.
pub const MAP_STYLE: &str = "light";

// =============================================================================
// PROFILE
// =============================================================================

/// Title of the financial bar chart.
pub const FINANCIAL_CHART_TITLE: &str = "Annual Revenue over the years";

/// X axis label of the financial bar chart.
pub const FINANCIAL_CHART_X_LABEL: &str = "Year";

/// Y axis label of the financial bar chart.
pub const FINANCIAL_CHART_Y_LABEL: &str = "Revenue in Million Euros";

// =============================================================================
// ASSISTANT
// =============================================================================

/// First transcript entry of every session.
pub const ASSISTANT_GREETING: &str = "Hello, how can I help you today?";

/// Pause between revealed words of an assistant reply, in milliseconds.
pub const WORD_DELAY_MS: u64 = 20;

// =============================================================================
// OUTREACH
// =============================================================================

/// Salutations whose presence marks a reply as a letter.
pub const LETTER_MARKERS: &[&str] = &["Dear", "Sehr geehrt"];

/// Subject used when the letter carries no subject line.
pub const FALLBACK_SUBJECT: &str = "Welcome from Mercedes-Benz Trucks!";

/// Sender address of generated outreach mails.
pub const OUTREACH_SENDER: &str = "becker.david@mercedes-trucks.com";

/// Plain-text part for mail clients without HTML support.
pub const PLAIN_TEXT_FALLBACK: &str =
    "This is a fallback message for email clients that do not understand HTML";

/// Download filename of the outreach artifact.
pub const OUTREACH_FILENAME: &str = "outreach_letter.eml";

/// MIME type of the outreach artifact.
pub const OUTREACH_MIME_TYPE: &str = "message/rfc822";

// =============================================================================
// CHAT SERVICE
// =============================================================================

/// Default chat-completion endpoint.
pub const CHAT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Default request timeout for chat calls, in seconds.
pub const CHAT_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// SERVER
// =============================================================================

/// Default dataset location.
pub const DATASET_PATH: &str = "data/speditionen.json";

/// Default root directory for fleet images.
pub const IMAGE_ROOT: &str = ".";

/// Default listen port.
pub const PORT: u16 = 3000;

/// Default request body limit in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Idle time after which a session is discarded, in seconds.
pub const SESSION_TTL_SECS: u64 = 3600;
