use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::review::ValidationError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub created_by: String, // ID of the admin who added the restaurant
    pub created_at: DateTime<Utc>,
}

/// Body of a create request. Only `name` is mandatory.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewRestaurant {
    pub name: String,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// Body of an update request. Absent fields keep their stored value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// Trims an optional text field. Blank text counts as no value.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl NewRestaurant {
    /// Checks the name and trims every field in place.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        self.cuisine = non_blank(self.cuisine.take());
        self.address = non_blank(self.address.take());
        self.description = non_blank(self.description.take());
        Ok(())
    }
}

impl RestaurantUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err(ValidationError::MissingName),
            _ => Ok(()),
        }
    }

    /// Absent fields are left alone. A blank optional field clears it.
    pub fn apply(self, restaurant: &mut Restaurant) {
        if let Some(name) = self.name {
            restaurant.name = name.trim().to_string();
        }
        if let Some(cuisine) = self.cuisine {
            restaurant.cuisine = non_blank(Some(cuisine));
        }
        if let Some(address) = self.address {
            restaurant.address = non_blank(Some(address));
        }
        if let Some(description) = self.description {
            restaurant.description = non_blank(Some(description));
        }
    }
}
