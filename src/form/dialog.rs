//! Fixed form choices and the confirmation dialog check

use crate::common::{Error, Result};

use super::person::Person;

/// Choices the scenario makes on every run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSelections {
    pub gender: String,
    pub birth_day: u32,
    pub birth_month: String,
    pub birth_year: u32,
    pub subject: String,
    pub hobby: String,
    /// First entry of the state dropdown
    pub state: String,
    /// First entry of the city dropdown once the state is chosen
    pub city: String,
}

impl Default for FormSelections {
    fn default() -> Self {
        Self {
            gender: "Male".to_string(),
            birth_day: 15,
            birth_month: "May".to_string(),
            birth_year: 1990,
            subject: "Maths".to_string(),
            hobby: "Sports".to_string(),
            state: "NCR".to_string(),
            city: "Delhi".to_string(),
        }
    }
}

impl FormSelections {
    /// Date as the dialog renders it, e.g. `15 May,1990`
    pub fn date_of_birth(&self) -> String {
        format!("{} {},{}", self.birth_day, self.birth_month, self.birth_year)
    }
}

/// Class of a day cell in the date picker, e.g. `react-datepicker__day--015`
pub fn day_class(day: u32) -> String {
    format!("react-datepicker__day--{:03}", day)
}

/// XPath for a label whose text contains `text`
pub fn label_xpath(text: &str) -> String {
    format!("//label[contains(text(),'{}')]", text)
}

/// Lines the dialog must contain after a successful submit
pub fn expected_fragments(person: &Person, selections: &FormSelections) -> Vec<String> {
    vec![
        format!("Student Name {}", person.full_name()),
        format!("Student Email {}", person.email),
        format!("Gender {}", selections.gender),
        format!("Mobile {}", person.mobile),
        format!("Date of Birth {}", selections.date_of_birth()),
        format!("Subjects {}", selections.subject),
        format!("Hobbies {}", selections.hobby),
        format!("Address {}", person.address),
        format!("State and City {} {}", selections.state, selections.city),
    ]
}

/// Check the dialog text, reporting every missing line at once
pub fn verify_dialog(text: &str, person: &Person, selections: &FormSelections) -> Result<()> {
    let missing: Vec<String> = expected_fragments(person, selections)
        .into_iter()
        .filter(|fragment| !text.contains(fragment.as_str()))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let mut message = format!("confirmation dialog is missing {} expected line(s):", missing.len());
    for fragment in &missing {
        message.push_str(&format!("\n  expected: {:?}", fragment));
    }
    message.push_str(&format!("\n  actual dialog text: {:?}", text));
    Err(Error::Assertion(message))
}
