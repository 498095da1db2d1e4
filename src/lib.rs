pub mod model;
pub mod scenario;
pub mod sim;

#[cfg(test)]
mod test;
