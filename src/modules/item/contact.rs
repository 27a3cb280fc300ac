// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::modules::{
    error::PimResult,
    item::{
        core::{ItemCore, CONTACT_ALIASES},
        fields::{first_datetime, first_string, lookup, value_to_string},
        views::{ContactField, CONTACT_TABLES},
        ItemCodec, ItemKind,
    },
    property::JsonObject,
};

pub const PERSON_FORM: &str = "Person";
pub const GROUP_FORM: &str = "Group";

pub const EMAIL_SLOTS: usize = 6;

pub const HOME_EMAIL_SLOTS: [&str; EMAIL_SLOTS] = [
    "Home0Email",
    "Home1Email",
    "Home2Email",
    "Home3Email",
    "Home4Email",
    "Home5Email",
];

// The mail template names work slots 0 and 3 with a capital letter.
pub const WORK_EMAIL_SLOTS: [&str; EMAIL_SLOTS] = [
    "Work0Email",
    "work1Email",
    "work2Email",
    "Work3Email",
    "work4Email",
    "work5Email",
];

pub const OTHER_EMAIL_SLOTS: [&str; EMAIL_SLOTS] = [
    "Other0Email",
    "Other1Email",
    "Other2Email",
    "Other3Email",
    "Other4Email",
    "Other5Email",
];

pub const PHONE_SLOTS: usize = 6;

pub const PHONE_NUMBER_SLOTS: [&str; PHONE_SLOTS] = [
    "Phone0Number",
    "Phone1Number",
    "Phone2Number",
    "Phone3Number",
    "Phone4Number",
    "Phone5Number",
];

pub const PHONE_LABEL_SLOTS: [&str; PHONE_SLOTS] = [
    "Phone0Label",
    "Phone1Label",
    "Phone2Label",
    "Phone3Label",
    "Phone4Label",
    "Phone5Label",
];

const TYPED_PHONE_FIELDS: [(PhoneKind, &str); 5] = [
    (PhoneKind::Home, "PhoneNumber"),
    (PhoneKind::Work, "OfficePhoneNumber"),
    (PhoneKind::Mobile, "CellPhoneNumber"),
    (PhoneKind::HomeFax, "HomeFAXPhoneNumber"),
    (PhoneKind::WorkFax, "OfficeFAXPhoneNumber"),
];

const PRIMARY_EMAIL_FIELDS: &[&str] = &["InternetAddress", "MailAddress", "Email"];

struct AddressFields {
    street: &'static str,
    city: &'static str,
    state: &'static str,
    postal_code: &'static str,
    country: &'static str,
}

const HOME_ADDRESS: AddressFields = AddressFields {
    street: "StreetAddress",
    city: "City",
    state: "State",
    postal_code: "Zip",
    country: "country",
};

const WORK_ADDRESS: AddressFields = AddressFields {
    street: "OfficeStreetAddress",
    city: "OfficeCity",
    state: "OfficeState",
    postal_code: "OfficeZIP",
    country: "OfficeCountry",
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PhoneKind {
    Home,
    Work,
    Mobile,
    HomeFax,
    WorkFax,
    Pager,
    Other,
}

impl PhoneKind {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "home" => PhoneKind::Home,
            "work" | "office" | "business" => PhoneKind::Work,
            "mobile" | "cell" => PhoneKind::Mobile,
            "homefax" | "home fax" => PhoneKind::HomeFax,
            "workfax" | "work fax" | "officefax" => PhoneKind::WorkFax,
            "pager" => PhoneKind::Pager,
            _ => PhoneKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhoneKind::Home => "home",
            PhoneKind::Work => "work",
            PhoneKind::Mobile => "mobile",
            PhoneKind::HomeFax => "homefax",
            PhoneKind::WorkFax => "workfax",
            PhoneKind::Pager => "pager",
            PhoneKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhoneNumber {
    pub kind: PhoneKind,
    pub number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl PostalAddress {
    fn read(object: &JsonObject, fields: &AddressFields) -> Option<Self> {
        let address = PostalAddress {
            street: first_string(object, &[fields.street]),
            city: first_string(object, &[fields.city]),
            state: first_string(object, &[fields.state]),
            postal_code: first_string(object, &[fields.postal_code]),
            country: first_string(object, &[fields.country]),
        };
        (address != PostalAddress::default()).then_some(address)
    }

    fn write(address: Option<&Self>, fields: &AddressFields, target: &mut JsonObject) {
        let address = address.cloned().unwrap_or_default();
        let values = [
            (fields.street, address.street),
            (fields.city, address.city),
            (fields.state, address.state),
            (fields.postal_code, address.postal_code),
            (fields.country, address.country),
        ];
        for (field, value) in values {
            target.insert(field.into(), json!(value.unwrap_or_default()));
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PimContact {
    #[serde(flatten)]
    pub core: ItemCore,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub suffix: Option<String>,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub primary_email: Option<String>,
    pub home_emails: Vec<String>,
    pub work_emails: Vec<String>,
    pub other_emails: Vec<String>,
    pub phones: Vec<PhoneNumber>,
    pub home_address: Option<PostalAddress>,
    pub work_address: Option<PostalAddress>,
    pub birthday: Option<NaiveDate>,
    pub website: Option<String>,
}

fn read_slots(object: &JsonObject, slots: &[&str]) -> Vec<String> {
    slots
        .iter()
        .filter_map(|slot| lookup(object, slot).and_then(value_to_string))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Clears every slot, then fills them in order. Upstream leaves fields that
/// are absent from an update untouched, so an empty slot must be sent as "".
fn write_slots(target: &mut JsonObject, slots: &[&str], values: &[String], what: &str) {
    for slot in slots {
        target.insert((*slot).into(), json!(""));
    }
    if values.len() > slots.len() {
        warn!(
            "Contact has {} {} values but only {} slots; dropping the rest",
            values.len(),
            what,
            slots.len()
        );
    }
    for (slot, value) in slots.iter().zip(values) {
        target.insert((*slot).into(), json!(value));
    }
}

fn same_address(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl PimContact {
    pub fn display_name(&self) -> Option<String> {
        self.full_name.clone().or_else(|| {
            let parts: Vec<&str> = [&self.first_name, &self.last_name]
                .into_iter()
                .filter_map(|p| p.as_deref())
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        })
    }

    /// Work emails with the primary address moved to slot 0 when it is one of them.
    pub fn ordered_work_emails(&self) -> Vec<String> {
        let mut emails = self.work_emails.clone();
        if let Some(primary) = &self.primary_email {
            if let Some(position) = emails.iter().position(|e| same_address(e, primary)) {
                let email = emails.remove(position);
                emails.insert(0, email);
            }
        }
        emails
    }

    fn read_phones(object: &JsonObject) -> Vec<PhoneNumber> {
        let mut phones: Vec<PhoneNumber> = TYPED_PHONE_FIELDS
            .iter()
            .filter_map(|(kind, field)| {
                first_string(object, &[*field]).map(|number| PhoneNumber {
                    kind: *kind,
                    number,
                })
            })
            .collect();
        for (number_slot, label_slot) in PHONE_NUMBER_SLOTS.iter().zip(PHONE_LABEL_SLOTS) {
            if let Some(number) = first_string(object, &[*number_slot]) {
                let kind = first_string(object, &[label_slot])
                    .map(|label| PhoneKind::parse(&label))
                    .unwrap_or(PhoneKind::Other);
                phones.push(PhoneNumber { kind, number });
            }
        }
        phones
    }

    /// Each kind's first number goes to its named field; everything else
    /// takes the next generic labelled slot.
    fn write_phones(&self, target: &mut JsonObject) {
        for (_, field) in TYPED_PHONE_FIELDS {
            target.insert(field.into(), json!(""));
        }
        for (number_slot, label_slot) in PHONE_NUMBER_SLOTS.iter().zip(PHONE_LABEL_SLOTS) {
            target.insert((*number_slot).into(), json!(""));
            target.insert(label_slot.into(), json!(""));
        }

        let mut used_typed: Vec<PhoneKind> = Vec::new();
        let mut next_slot = 0;
        for phone in &self.phones {
            let typed = TYPED_PHONE_FIELDS
                .iter()
                .find(|(kind, _)| *kind == phone.kind && !used_typed.contains(kind));
            if let Some((kind, field)) = typed {
                used_typed.push(*kind);
                target.insert((*field).into(), json!(phone.number));
                continue;
            }
            if next_slot >= PHONE_SLOTS {
                warn!(
                    "Contact has more phone numbers than slots; dropping {}",
                    phone.number
                );
                continue;
            }
            target.insert(PHONE_NUMBER_SLOTS[next_slot].into(), json!(phone.number));
            target.insert(PHONE_LABEL_SLOTS[next_slot].into(), json!(phone.kind.label()));
            next_slot += 1;
        }
    }
}

impl ItemCodec for PimContact {
    const KIND: ItemKind = ItemKind::Contact;

    fn from_primitive(object: &JsonObject, view_name: &str) -> PimResult<Self> {
        let mut core = ItemCore::from_primitive(object, view_name);
        let fields = CONTACT_TABLES.resolve(object, view_name);
        let text = |field| fields.get(field).and_then(value_to_string);

        let primary_email = text(ContactField::Email);
        let phones = [
            (ContactField::WorkPhone, PhoneKind::Work),
            (ContactField::HomePhone, PhoneKind::Home),
            (ContactField::MobilePhone, PhoneKind::Mobile),
        ]
        .into_iter()
        .filter_map(|(field, kind)| text(field).map(|number| PhoneNumber { kind, number }))
        .collect();

        let mut contact = PimContact {
            full_name: text(ContactField::FullName),
            first_name: text(ContactField::FirstName),
            last_name: text(ContactField::LastName),
            company_name: text(ContactField::CompanyName),
            job_title: text(ContactField::JobTitle),
            work_emails: primary_email.clone().into_iter().collect(),
            primary_email,
            phones,
            ..Default::default()
        };
        core.ensure_created();
        core.set_subject_if_empty(contact.display_name());
        contact.core = core;
        Ok(contact)
    }

    fn from_document(object: &JsonObject) -> PimResult<Self> {
        let mut core = ItemCore::from_document(object, &CONTACT_ALIASES);
        let mut contact = PimContact {
            first_name: first_string(object, &["FirstName"]),
            middle_name: first_string(object, &["MiddleInitial", "MiddleName"]),
            last_name: first_string(object, &["LastName"]),
            title: first_string(object, &["Title"]),
            suffix: first_string(object, &["Suffix"]),
            full_name: first_string(object, &["FullName", "DisplayName"]),
            company_name: first_string(object, &["CompanyName"]),
            department: first_string(object, &["Department"]),
            job_title: first_string(object, &["JobTitle"]),
            primary_email: first_string(object, PRIMARY_EMAIL_FIELDS),
            home_emails: read_slots(object, &HOME_EMAIL_SLOTS),
            work_emails: read_slots(object, &WORK_EMAIL_SLOTS),
            other_emails: read_slots(object, &OTHER_EMAIL_SLOTS),
            phones: Self::read_phones(object),
            home_address: PostalAddress::read(object, &HOME_ADDRESS),
            work_address: PostalAddress::read(object, &WORK_ADDRESS),
            birthday: first_datetime(object, &["Birthday"]).map(|dt| dt.date_naive()),
            website: first_string(object, &["WebSite", "WebSiteURL"]),
            ..Default::default()
        };
        contact.work_emails = contact.ordered_work_emails();
        core.set_subject_if_empty(contact.display_name());
        contact.core = core;
        Ok(contact)
    }

    fn to_document(&self) -> JsonObject {
        let mut document = JsonObject::new();
        document.insert("Form".into(), json!(PERSON_FORM));
        document.insert("Type".into(), json!(PERSON_FORM));
        self.core.write_document(&mut document, &CONTACT_ALIASES);
        self.core.write_document_flags(&mut document);

        let scalars = [
            ("FirstName", &self.first_name),
            ("MiddleInitial", &self.middle_name),
            ("LastName", &self.last_name),
            ("Title", &self.title),
            ("Suffix", &self.suffix),
            ("FullName", &self.full_name),
            ("CompanyName", &self.company_name),
            ("Department", &self.department),
            ("JobTitle", &self.job_title),
            ("WebSite", &self.website),
        ];
        for (field, value) in scalars {
            if let Some(value) = value {
                document.insert(field.into(), json!(value));
            }
        }
        if let Some(birthday) = &self.birthday {
            document.insert("Birthday".into(), json!(birthday.format("%Y-%m-%d").to_string()));
        }

        document.insert(
            PRIMARY_EMAIL_FIELDS[0].into(),
            json!(self.primary_email.clone().unwrap_or_default()),
        );
        write_slots(&mut document, &HOME_EMAIL_SLOTS, &self.home_emails, "home email");
        write_slots(
            &mut document,
            &WORK_EMAIL_SLOTS,
            &self.ordered_work_emails(),
            "work email",
        );
        write_slots(&mut document, &OTHER_EMAIL_SLOTS, &self.other_emails, "other email");
        self.write_phones(&mut document);
        PostalAddress::write(self.home_address.as_ref(), &HOME_ADDRESS, &mut document);
        PostalAddress::write(self.work_address.as_ref(), &WORK_ADDRESS, &mut document);
        document
    }

    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }
}
