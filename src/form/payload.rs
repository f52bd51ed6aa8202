use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::client_id;
use super::fields::{Field, FormView, RadioGroup};

pub const SMS_TRUE: &str = "TRUE";
pub const SMS_FALSE: &str = "FALSE";

/// The record posted to the webhook. Built fresh for every submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub client_id: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub send_sms: String,
    pub booking_link: String,
    pub service_type: String,
    pub service_area: String,
    pub lead_handling_method: String,
    pub source: String,
    pub page_url: String,
    pub timestamp: String,
}

impl Payload {
    /// Read the current form state. `sms_visible` decides whether the SMS
    /// radio is consulted at all; a hidden section always sends `"FALSE"`.
    pub fn collect(
        form: &dyn FormView,
        sms_visible: bool,
        source: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let business_name = form.value(Field::BusinessName).trim().to_string();

        let send_sms = if sms_visible {
            form.checked(RadioGroup::Sms)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| SMS_FALSE.to_string())
        } else {
            SMS_FALSE.to_string()
        };

        let lead_handling_method = form
            .checked(RadioGroup::LeadHandlingMethod)
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        Payload {
            client_id: client_id::derive(&business_name),
            business_name,
            email: trimmed(form, Field::Email),
            phone: trimmed(form, Field::Phone),
            send_sms,
            booking_link: trimmed(form, Field::BookingLink),
            service_type: trimmed(form, Field::ServiceType),
            service_area: trimmed(form, Field::ServiceArea),
            lead_handling_method,
            source: source.to_string(),
            page_url: form.page_url(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Key/value pairs in wire order.
    pub fn pairs(&self) -> [(&'static str, &str); 12] {
        [
            ("client_id", self.client_id.as_str()),
            ("business_name", self.business_name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("send_sms", self.send_sms.as_str()),
            ("booking_link", self.booking_link.as_str()),
            ("service_type", self.service_type.as_str()),
            ("service_area", self.service_area.as_str()),
            ("lead_handling_method", self.lead_handling_method.as_str()),
            ("source", self.source.as_str()),
            ("page_url", self.page_url.as_str()),
            ("timestamp", self.timestamp.as_str()),
        ]
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_form_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

fn trimmed(form: &dyn FormView, field: Field) -> String {
    form.value(field).trim().to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::form::fields::{FormSnapshot, FormValues};

    fn filled_form() -> FormSnapshot {
        FormSnapshot::new(FormValues {
            business_name: "  Joe's Plumbing Co. ".into(),
            email: " joe@plumbing.example ".into(),
            phone: "555 123 4567".into(),
            booking_link: "https://cal.example/joe".into(),
            service_type: "plumbing".into(),
            service_area: " Austin, TX ".into(),
            lead_handling_method: Some("call".into()),
            sms: Some("TRUE".into()),
            page_url: "https://onboard.example/".into(),
        })
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn collects_trimmed_values_and_derived_id() {
        let payload = Payload::collect(&filled_form(), true, "client_onboarding", noon());

        assert_eq!(payload.client_id, "joes_plumbing_co");
        assert_eq!(payload.business_name, "Joe's Plumbing Co.");
        assert_eq!(payload.email, "joe@plumbing.example");
        assert_eq!(payload.service_area, "Austin, TX");
        assert_eq!(payload.lead_handling_method, "call");
        assert_eq!(payload.send_sms, SMS_TRUE);
        assert_eq!(payload.source, "client_onboarding");
        assert_eq!(payload.page_url, "https://onboard.example/");
        assert_eq!(payload.timestamp, "2026-10-19T12:00:00.000Z");
    }

    #[test]
    fn hidden_sms_section_forces_false() {
        let payload = Payload::collect(&filled_form(), false, "client_onboarding", noon());
        assert_eq!(payload.send_sms, SMS_FALSE);
    }

    #[test]
    fn visible_sms_without_choice_defaults_false() {
        let form = filled_form();
        form.check(RadioGroup::Sms, None);
        let payload = Payload::collect(&form, true, "client_onboarding", noon());
        assert_eq!(payload.send_sms, "FALSE");
    }

    #[test]
    fn missing_lead_handling_is_empty() {
        let form = filled_form();
        form.check(RadioGroup::LeadHandlingMethod, None);
        let payload = Payload::collect(&form, true, "client_onboarding", noon());
        assert_eq!(payload.lead_handling_method, "");
    }

    #[test]
    fn json_and_form_carry_the_same_fields() {
        let payload = Payload::collect(&filled_form(), true, "client_onboarding", noon());

        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        let form: Vec<(String, String)> =
            form_urlencoded::parse(payload.to_form_urlencoded().as_bytes())
                .into_owned()
                .collect();

        assert_eq!(form.len(), 12);
        for (key, value) in &form {
            assert_eq!(json[key.as_str()], value.as_str(), "mismatch on {key}");
        }
        assert_eq!(form[0].0, "client_id");
        assert_eq!(form[11].0, "timestamp");
    }

    #[test]
    fn form_body_escapes_reserved_characters() {
        let payload = Payload::collect(&filled_form(), true, "client_onboarding", noon());
        let body = payload.to_form_urlencoded();
        assert!(body.contains("business_name=Joe%27s+Plumbing+Co."));
        assert!(body.contains("email=joe%40plumbing.example"));
    }
}
