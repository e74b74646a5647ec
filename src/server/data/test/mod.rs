mod ad;
mod user;
