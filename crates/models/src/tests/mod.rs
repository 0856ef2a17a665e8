/// CRUD round trips against a real Postgres, skipped without one
pub mod crud_tests;
