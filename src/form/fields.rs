use std::sync::{Mutex, MutexGuard};

use serde::Deserialize;

/// Text inputs and selects on the onboarding form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BusinessName,
    Email,
    Phone,
    BookingLink,
    ServiceType,
    ServiceArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioGroup {
    Sms,
    LeadHandlingMethod,
}

/// Access to the host's form controls. The controller only ever reads current
/// values through this trait, plus one `reset` after a successful submission.
pub trait FormView: Send + Sync {
    /// Raw, untrimmed value of a text input or select.
    fn value(&self, field: Field) -> String;
    /// Value of the checked radio in a group, if any.
    fn checked(&self, group: RadioGroup) -> Option<String>;
    fn page_url(&self) -> String;
    fn reset(&self);
}

/// Plain field values, as typed by the user. Also the stdin format of the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormValues {
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub booking_link: String,
    pub service_type: String,
    pub service_area: String,
    pub lead_handling_method: Option<String>,
    pub sms: Option<String>,
    pub page_url: String,
}

impl FormValues {
    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::BusinessName => &mut self.business_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::BookingLink => &mut self.booking_link,
            Field::ServiceType => &mut self.service_type,
            Field::ServiceArea => &mut self.service_area,
        }
    }

    fn radio(&mut self, group: RadioGroup) -> &mut Option<String> {
        match group {
            RadioGroup::Sms => &mut self.sms,
            RadioGroup::LeadHandlingMethod => &mut self.lead_handling_method,
        }
    }
}

/// In-memory form backing `FormView`. Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct FormSnapshot {
    values: Mutex<FormValues>,
}

impl FormSnapshot {
    pub fn new(values: FormValues) -> Self {
        Self {
            values: Mutex::new(values),
        }
    }

    pub fn set(&self, field: Field, value: &str) {
        *self.lock().slot(field) = value.to_string();
    }

    pub fn check(&self, group: RadioGroup, value: Option<&str>) {
        *self.lock().radio(group) = value.map(|v| v.to_string());
    }

    pub fn values(&self) -> FormValues {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, FormValues> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FormView for FormSnapshot {
    fn value(&self, field: Field) -> String {
        self.lock().slot(field).clone()
    }

    fn checked(&self, group: RadioGroup) -> Option<String> {
        self.lock().radio(group).clone()
    }

    fn page_url(&self) -> String {
        self.lock().page_url.clone()
    }

    fn reset(&self) {
        let mut values = self.lock();
        let page_url = std::mem::take(&mut values.page_url);
        *values = FormValues {
            page_url,
            ..FormValues::default()
        };
    }
}
