//! Fixed HTML template for the notification email.

use html_escape::{encode_double_quoted_attribute, encode_text};
use swagwatch_core::{NotificationPayload, SwagCodeKind};

const COMPANION_SITE_URL: &str = "http://sc-s.com/";
const REWARDS_SITE_URL: &str = "https://www.swagbucks.com/";

/// Renders the notification email for `payload`.
///
/// Link codes render as a "Click Here" anchor; direct codes render as the
/// literal code in an `<h3>`. All interpolated values are HTML-escaped.
#[must_use]
pub fn render_email(payload: &NotificationPayload) -> String {
    let reward = &payload.reward;
    let code_block = match payload.code.kind {
        SwagCodeKind::Link => format!(
            r#"<a href="{}" target="_blank" style="font-size: large; color:#339FBA">Click Here to Get the Swag Code</a>"#,
            encode_double_quoted_attribute(&payload.code.value)
        ),
        SwagCodeKind::Direct => format!("<h3>{}</h3>", encode_text(&payload.code.value)),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<body style="font-family: Roboto,Helvetica,Arial,sans-serif;">
    <p style="text-align: center; margin: 0">
        SwagCode (<strong>{amount} SBs</strong>) is valid until <strong>{expiry}</strong> {zone}
    </p>
    <div style="text-align: center">
        <div style="line-height: 60px; font-weight: bold; height:25px"></div>
        {code_block}
        <p style="margin: 0; margin-top: 10px; margin-bottom: 10px">
            Visit the <a href="{companion}" target="_blank">Swag Code Spoiler</a> official website for other swag code details. Go to SwagBucks to claim your free SB.
        </p>
        <a href="{rewards}"
           style="background-color:#FFFFFF; border:2px solid #339fba; border-radius:5px; color:#339FBA; display:inline-block; font-size:14px; font-weight:bold; letter-spacing:0; line-height:normal; padding:6px 13px 6px 13px; text-align:center; text-decoration:none"
           target="_blank">
            Swagbucks
        </a>
    </div>
</body>
</html>
"#,
        amount = reward.amount,
        expiry = reward.expiry_clock(),
        zone = reward.expiry_zone_abbreviation(),
        companion = COMPANION_SITE_URL,
        rewards = REWARDS_SITE_URL,
    )
}
