mod promotions;
mod subscriptions;
mod users;

pub use promotions::PromotionService;
pub use subscriptions::SubscriptionService;
pub use users::UserService;
