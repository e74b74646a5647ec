use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::user::UserFactory};

use crate::server::data::user::UserRepository;

mod count;
mod find_scammer_by_username;
mod get_blacklist;
