/// Primary keys are PostgreSQL BIGSERIAL, so always positive in practice.
pub type DbId = i64;
