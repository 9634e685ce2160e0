use dtogen::Entity;

/// Entities tracked by the fleet service.
pub trait Asset: Entity {
    fn label(&self) -> String;
}

#[derive(Debug, Clone, Entity)]
pub struct Car {
    pub id: i32,
    pub model: String,
    pub motor: String,
    #[no_dto]
    pub gears: i32,
}

impl Asset for Car {
    fn label(&self) -> String {
        format!("{} ({})", self.model, self.motor)
    }
}

#[derive(Debug, Clone)]
pub struct Truck {
    pub id: i32,
    pub payload_kg: f64,
    pub tags: Vec<String>,
}

impl Entity for Truck {}

impl Asset for Truck {
    fn label(&self) -> String {
        format!("truck #{}", self.id)
    }
}

#[derive(Debug, Clone, Entity)]
pub struct Shipment {
    pub id: i32,
    pub destination: String,
    #[cfg(feature = "audit")]
    pub audited_by: String,
}
