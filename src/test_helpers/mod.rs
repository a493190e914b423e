pub mod db;
pub mod state;
pub mod test_container;

pub mod prelude {
    pub use super::{db::TestDb, state::TestState, test_container::TestContainer};
}
