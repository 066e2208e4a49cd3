//! Randomised form input

use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::Rng;

/// Length of the mobile number the form accepts
pub const MOBILE_DIGITS: usize = 10;

/// Data typed into the form, checked back verbatim against the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
}

impl Person {
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let email: String = SafeEmail().fake_with_rng(rng);

        let mobile = (0..MOBILE_DIGITS)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();

        let building: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        let city: String = CityName().fake_with_rng(rng);
        let state: String = StateAbbr().fake_with_rng(rng);
        let zip: String = ZipCode().fake_with_rng(rng);
        let postal = format!("{} {}\n{}, {} {}", building, street, city, state, zip);

        Self {
            first_name,
            last_name,
            email,
            mobile,
            address: single_line(&postal),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The address textarea echoes newlines as spaces in the dialog
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}
