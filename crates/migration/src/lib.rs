pub use sea_orm_migration::prelude::*;

mod m20250801_create_school_tables;
mod m20250802_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_create_school_tables::Migration),
            Box::new(m20250802_add_indexes::Migration),
        ]
    }
}
