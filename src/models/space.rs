use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vehicle_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Bike,
    Suv,
}

/// Hourly/daily/monthly rates for one vehicle type, in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSheet {
    pub hourly: i64,
    pub daily: i64,
    pub monthly: i64,
}

/// Per-vehicle rate sheets, stored as a JSONB blob on the space row.
/// An entry may be absent; quoting for that vehicle type then fails
/// validation rather than defaulting to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacePricing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<RateSheet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bike: Option<RateSheet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suv: Option<RateSheet>,
}

impl SpacePricing {
    pub fn for_vehicle(&self, vehicle: VehicleType) -> Option<&RateSheet> {
        match vehicle {
            VehicleType::Car => self.car.as_ref(),
            VehicleType::Bike => self.bike.as_ref(),
            VehicleType::Suv => self.suv.as_ref(),
        }
    }
}

/// Remaining per-vehicle capacity of a space. Slot inventory exists for cars
/// and bikes only; the aggregate columns (`total_slots`, `is_available`) are
/// always derived from these two counters, never written independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCounts {
    pub car: i32,
    pub bike: i32,
}

impl SlotCounts {
    pub fn total(&self) -> i32 {
        self.car + self.bike
    }

    pub fn is_available(&self) -> bool {
        self.total() > 0
    }

    /// Claims one slot for the given vehicle type, leaving the other counter
    /// untouched. Returns `None` when the matching counter is exhausted or
    /// the vehicle type carries no slot inventory (SUV).
    pub fn reserve(self, vehicle: VehicleType) -> Option<SlotCounts> {
        match vehicle {
            VehicleType::Car if self.car > 0 => Some(SlotCounts {
                car: self.car - 1,
                ..self
            }),
            VehicleType::Bike if self.bike > 0 => Some(SlotCounts {
                bike: self.bike - 1,
                ..self
            }),
            _ => None,
        }
    }
}

/// Provider-submitted listing fields. The aggregate counters
/// (`total_slots`, `is_available`) are never accepted from the client;
/// they are recomputed from the slot counts on every write.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    pub landmark: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub pricing: SpacePricing,
    pub car_slots: i32,
    pub bike_slots: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParkingSpace {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub landmark: Option<String>,
    pub amenities: Vec<String>,
    pub pricing: Json<SpacePricing>,
    pub car_slots: i32,
    pub bike_slots: i32,
    pub total_slots: i32,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ParkingSpace {
    pub fn slots(&self) -> SlotCounts {
        SlotCounts {
            car: self.car_slots,
            bike: self.bike_slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserving_a_car_slot_decrements_only_cars() {
        let slots = SlotCounts { car: 3, bike: 2 };
        let updated = slots.reserve(VehicleType::Car).unwrap();
        assert_eq!(updated, SlotCounts { car: 2, bike: 2 });
        assert_eq!(updated.total(), 4);
        assert!(updated.is_available());
    }

    #[test]
    fn last_bike_slot_leaves_availability_to_the_cars() {
        // bike_slots = 1: the reservation succeeds, and the space stays
        // available only while car slots remain.
        let updated = SlotCounts { car: 2, bike: 1 }
            .reserve(VehicleType::Bike)
            .unwrap();
        assert_eq!(updated.bike, 0);
        assert!(updated.is_available());

        let drained = SlotCounts { car: 0, bike: 1 }
            .reserve(VehicleType::Bike)
            .unwrap();
        assert_eq!(drained.bike, 0);
        assert!(!drained.is_available());
    }

    #[test]
    fn exhausted_counter_refuses_the_reservation() {
        let slots = SlotCounts { car: 0, bike: 5 };
        assert_eq!(slots.reserve(VehicleType::Car), None);
    }

    #[test]
    fn suv_has_no_slot_inventory() {
        let slots = SlotCounts { car: 5, bike: 5 };
        assert_eq!(slots.reserve(VehicleType::Suv), None);
    }

    #[test]
    fn missing_rate_sheet_entry_is_detectable() {
        let pricing = SpacePricing {
            car: Some(RateSheet {
                hourly: 10,
                daily: 50,
                monthly: 1000,
            }),
            ..Default::default()
        };
        assert!(pricing.for_vehicle(VehicleType::Car).is_some());
        assert!(pricing.for_vehicle(VehicleType::Bike).is_none());
    }
}
