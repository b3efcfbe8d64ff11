pub(crate) mod kickoff;
pub(crate) mod record;
pub(crate) mod schedule;
