pub mod fleet;

use dtogen::Entity;

#[derive(Debug, Clone, Entity)]
pub struct Person {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[no_dto]
    pub age: i32,
}

#[derive(Debug, Clone, Entity)]
pub struct Empty {}

/// Every field is excluded; the DTO is still generated.
#[derive(Debug, Clone, Entity)]
pub struct Foo {
    #[no_dto]
    pub secret: String,
}

/// Not an entity.
#[derive(Debug, Clone)]
pub struct Address {
    pub street: String,
    pub city: String,
}
