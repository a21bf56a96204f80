use mongodb::bson::Bson;
use mongodb::bson::oid::ObjectId;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Keys of an employee document, as they appear on the wire and in storage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, AsRefStr, Display, EnumIter, EnumString)]
pub enum EmployeeField {
    #[strum(serialize = "Emp/IC Code")]
    EmpCode,
    #[strum(serialize = "Employee Name")]
    EmployeeName,
    #[strum(serialize = "Business Title")]
    BusinessTitle,
    #[strum(serialize = "Category")]
    Category,
    #[strum(serialize = "Station Code")]
    StationCode,
    #[strum(serialize = "Location")]
    Location,
    #[strum(serialize = "Mail ID")]
    MailId,
    #[strum(serialize = "DOB")]
    DateOfBirth,
    #[strum(serialize = "PAN CARD")]
    PanCard,
    #[strum(serialize = "Mobile Number")]
    MobileNumber,
    #[strum(serialize = "Password")]
    Password,
}

impl EmployeeField {
    pub fn is_numeric(self) -> bool {
        self == EmployeeField::MobileNumber
    }
}

/// Stored shape of an employee. `password` holds an Argon2 PHC string once
/// the gateway has processed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "Emp/IC Code")]
    pub emp_code: String,
    #[serde(rename = "Employee Name")]
    pub employee_name: String,
    #[serde(rename = "Business Title")]
    pub business_title: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Station Code")]
    pub station_code: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Mail ID")]
    pub mail_id: String,
    #[serde(rename = "DOB")]
    pub date_of_birth: String,
    #[serde(rename = "PAN CARD")]
    pub pan_card: String,
    #[serde(rename = "Mobile Number", deserialize_with = "whole_number")]
    pub mobile_number: i64,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Fields supplied to a partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub emp_code: Option<String>,
    pub employee_name: Option<String>,
    pub business_title: Option<String>,
    pub category: Option<String>,
    pub station_code: Option<String>,
    pub location: Option<String>,
    pub mail_id: Option<String>,
    pub date_of_birth: Option<String>,
    pub pan_card: Option<String>,
    pub mobile_number: Option<i64>,
    pub password: Option<String>,
}

impl EmployeePatch {
    pub fn set_text(&mut self, field: EmployeeField, value: String) {
        let slot = match field {
            EmployeeField::EmpCode => &mut self.emp_code,
            EmployeeField::EmployeeName => &mut self.employee_name,
            EmployeeField::BusinessTitle => &mut self.business_title,
            EmployeeField::Category => &mut self.category,
            EmployeeField::StationCode => &mut self.station_code,
            EmployeeField::Location => &mut self.location,
            EmployeeField::MailId => &mut self.mail_id,
            EmployeeField::DateOfBirth => &mut self.date_of_birth,
            EmployeeField::PanCard => &mut self.pan_card,
            EmployeeField::Password => &mut self.password,
            EmployeeField::MobileNumber => return,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        *self == EmployeePatch::default()
    }

    /// Text values in field order, skipping the ones left unset.
    pub fn text_values(&self) -> Vec<(EmployeeField, &str)> {
        [
            (EmployeeField::EmpCode, &self.emp_code),
            (EmployeeField::EmployeeName, &self.employee_name),
            (EmployeeField::BusinessTitle, &self.business_title),
            (EmployeeField::Category, &self.category),
            (EmployeeField::StationCode, &self.station_code),
            (EmployeeField::Location, &self.location),
            (EmployeeField::MailId, &self.mail_id),
            (EmployeeField::DateOfBirth, &self.date_of_birth),
            (EmployeeField::PanCard, &self.pan_card),
            (EmployeeField::Password, &self.password),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

/// Reads an integer that may have been stored as a BSON double, which is how
/// untyped JSON numbers land in the collection.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::Int32(n) => Ok(i64::from(n)),
        Bson::Int64(n) => Ok(n),
        Bson::Double(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Ok(n as i64),
        other => Err(D::Error::custom(format!(
            "expected a whole number, found {}",
            other
        ))),
    }
}

/// Response view of an employee: store id as hex, password withheld.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "_id": "665f1c2e9b1e8a3d4c5b6a70",
        "Emp/IC Code": "E100",
        "Employee Name": "Asha Bose",
        "Business Title": "Associate",
        "Category": "Delivery",
        "Station Code": "DEL1",
        "Location": "Gurgaon",
        "Mail ID": "asha.bose@example.com",
        "DOB": "1994-02-11",
        "PAN CARD": "ABCDE1234F",
        "Mobile Number": 9876543210u64
    })
)]
pub struct EmployeeRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Emp/IC Code")]
    pub emp_code: String,
    #[serde(rename = "Employee Name")]
    pub employee_name: String,
    #[serde(rename = "Business Title")]
    pub business_title: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Station Code")]
    pub station_code: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Mail ID")]
    pub mail_id: String,
    #[serde(rename = "DOB")]
    pub date_of_birth: String,
    #[serde(rename = "PAN CARD")]
    pub pan_card: String,
    #[serde(rename = "Mobile Number")]
    pub mobile_number: i64,
}

impl From<EmployeeDocument> for EmployeeRecord {
    fn from(doc: EmployeeDocument) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            emp_code: doc.emp_code,
            employee_name: doc.employee_name,
            business_title: doc.business_title,
            category: doc.category,
            station_code: doc.station_code,
            location: doc.location,
            mail_id: doc.mail_id,
            date_of_birth: doc.date_of_birth,
            pan_card: doc.pan_card,
            mobile_number: doc.mobile_number,
        }
    }
}
