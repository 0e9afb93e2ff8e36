use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::validator::{self, Validator, PHONE_RX};

/// School record as stored in the database. `id`, `created_at` and `version`
/// are written by the store on insert/update; callers own the other fields.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct School {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub name: String,
    pub level: String,
    pub contact: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub address: String,
    pub mode: Vec<String>,
    pub version: i32,
}

impl School {
    pub fn validate(&self, v: &mut Validator) {
        v.check(!self.name.is_empty(), "name", "must be provided");
        v.check(
            self.name.chars().count() <= 200,
            "name",
            "must not be more than 200 characters",
        );

        v.check(!self.level.is_empty(), "level", "must be provided");
        v.check(
            self.level.chars().count() <= 200,
            "level",
            "must not be more than 200 characters",
        );

        v.check(!self.contact.is_empty(), "contact", "must be provided");
        v.check(
            self.contact.chars().count() <= 200,
            "contact",
            "must not be more than 200 characters",
        );

        v.check(!self.phone.is_empty(), "phone", "must be provided");
        v.check(
            validator::matches(&self.phone, &PHONE_RX),
            "phone",
            "must be a valid phone number",
        );

        v.check(!self.email.is_empty(), "email", "must be provided");
        v.check(
            validator::is_email(&self.email),
            "email",
            "must be a valid email address",
        );

        v.check(!self.website.is_empty(), "website", "must be provided");
        v.check(
            validator::is_url(&self.website),
            "website",
            "must be a valid website",
        );

        v.check(!self.address.is_empty(), "address", "must be provided");
        v.check(
            self.address.chars().count() <= 500,
            "address",
            "must not be more than 500 characters",
        );

        v.check(
            !self.mode.is_empty(),
            "mode",
            "must contain at least one mode",
        );
        v.check(
            self.mode.len() <= 5,
            "mode",
            "must contain at most five modes",
        );
        v.check(
            validator::unique(&self.mode),
            "mode",
            "must not contain duplicates",
        );
    }
}

/// Decode target for POST /v1/schools. Every field is defaulted so an absent
/// field surfaces as a field-level validation error instead of a decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSchoolRequest {
    pub name: String,
    pub level: String,
    pub contact: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub address: String,
    pub mode: Vec<String>,
}

impl CreateSchoolRequest {
    pub fn into_school(self) -> School {
        School {
            id: 0,
            created_at: OffsetDateTime::UNIX_EPOCH,
            name: self.name,
            level: self.level,
            contact: self.contact,
            phone: self.phone,
            email: self.email,
            website: self.website,
            address: self.address,
            mode: self.mode,
            version: 0,
        }
    }
}

/// Partial patch for PATCH /v1/schools/:id. An omitted field leaves the
/// stored value untouched; `version` is the expected optimistic-lock token
/// from the caller's last read.
#[derive(Debug, Deserialize)]
pub struct UpdateSchoolRequest {
    pub name: Option<String>,
    pub level: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub mode: Option<Vec<String>>,
    pub version: Option<i32>,
}

impl UpdateSchoolRequest {
    pub fn apply(self, school: &mut School) {
        if let Some(name) = self.name {
            school.name = name;
        }
        if let Some(level) = self.level {
            school.level = level;
        }
        if let Some(contact) = self.contact {
            school.contact = contact;
        }
        if let Some(phone) = self.phone {
            school.phone = phone;
        }
        if let Some(email) = self.email {
            school.email = email;
        }
        if let Some(website) = self.website {
            school.website = website;
        }
        if let Some(address) = self.address {
            school.address = address;
        }
        if let Some(mode) = self.mode {
            school.mode = mode;
        }
        if let Some(version) = self.version {
            school.version = version;
        }
    }
}
