//! Faker generator catalog
//!
//! The fixed list of generator functions a column can draw mock values from.
//! Names follow the Faker provider method names they stand for.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A named synthetic-data generator
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FakerFunction {
    // Person
    Name,
    FirstName,
    LastName,
    UserName,
    Email,
    PhoneNumber,
    Job,
    Password,

    // Address
    Address,
    StreetAddress,
    City,
    Country,
    Postcode,
    Latitude,
    Longitude,

    // Company & finance
    Company,
    CreditCardNumber,
    Iban,
    CurrencyCode,

    // Text
    Word,
    Sentence,
    Paragraph,
    Text,

    // Internet
    Url,
    DomainName,
    Ipv4,
    Ipv6,

    // Date/Time
    Date,
    Time,
    DateTime,
    Year,

    // Numbers & identifiers
    Pyint,
    Pyfloat,
    Pybool,
    RandomInt,
    Uuid4,
    Md5,
    Sha256,
    Isbn13,
    Ean13,

    // Misc
    ColorName,
    FileName,
}

impl FakerFunction {
    /// Generator name as shown in dropdowns
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Look up a generator by name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }
}

/// Every generator in catalog order
pub fn faker_catalog() -> Vec<FakerFunction> {
    FakerFunction::iter().collect()
}
