mod helpers;
mod promotions;
mod users;
