mod promotions;
mod subscriptions;
mod users;

pub use promotions::PromotionsRepo;
pub use subscriptions::SubscriptionsRepo;
pub use users::UsersRepo;
