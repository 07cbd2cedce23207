//! Sea-ORM entities for the catalog tables.

pub mod brand;
pub mod category;
pub mod item;
pub mod item_image;
pub mod material;

use crate::models::Reference;

macro_rules! reference_into_domain {
    ($($module:ident),+) => {
        $(
            impl From<$module::Model> for Reference {
                fn from(model: $module::Model) -> Self {
                    Self {
                        id: model.id,
                        name: model.name,
                    }
                }
            }
        )+
    };
}

reference_into_domain!(category, brand, material);
