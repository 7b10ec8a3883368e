mod promotions;
mod subscriptions;
mod users;

pub use promotions::{
    NewPromotion, Promotion, PromotionField, PromotionStatus, PromotionUpdate,
};
pub use subscriptions::{NewSubscription, Subscription};
pub use users::{NewUser, User};
