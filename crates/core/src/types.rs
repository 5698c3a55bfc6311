/// Server-assigned primary keys (users, cities, locations, notes).
pub type DbId = i64;
