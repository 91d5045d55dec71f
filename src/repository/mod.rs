//! Repository layer for database operations

pub mod custom_fields;
pub mod locations;
pub mod roles;
pub mod staff;
pub mod users;
pub mod visitors;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub visitors: visitors::VisitorsRepository,
    pub locations: locations::LocationsRepository,
    pub staff: staff::StaffRepository,
    pub users: users::UsersRepository,
    pub custom_fields: custom_fields::CustomFieldsRepository,
    pub roles: roles::RolesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            visitors: visitors::VisitorsRepository::new(pool.clone()),
            locations: locations::LocationsRepository::new(pool.clone()),
            staff: staff::StaffRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            custom_fields: custom_fields::CustomFieldsRepository::new(pool.clone()),
            roles: roles::RolesRepository::new(pool.clone()),
            pool,
        }
    }
}
