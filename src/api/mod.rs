pub mod rugcheck;
pub mod throttle;

#[cfg(test)]
pub mod test_fixtures;
