//! Extra predicates that callers AND into a listing to enforce ownership and
//! visibility. A filter string can only narrow these, never widen them.

use crate::assets::{Asset, AssetFile, Visibility};
use crate::error::AssetListError;
use crate::query::{Conditions, Predicate};

/// Files whose bucket and owning asset agree with `visibility`.
///
/// PRIVATE needs `owner_user_id`, GROUP needs `owner_group_id`, and PUBLIC
/// takes neither (the asset must have no owners at all).
pub fn file_visibility_scope(
    visibility: Visibility,
    owner_user_id: Option<i64>,
    owner_group_id: Option<i64>,
) -> Result<Predicate<AssetFile>, AssetListError> {
    let bucket = Conditions::equals::<AssetFile>("bucketType", visibility.bucket())?;

    let ownership = match (visibility, owner_user_id, owner_group_id) {
        (Visibility::Private, Some(user_id), _) => {
            Conditions::equals("asset.ownerUserId", user_id)?
        }
        (Visibility::Private, None, _) => {
            return Err(AssetListError::InvalidScope(
                "PRIVATE files require an owner user".into(),
            ))
        }
        (Visibility::Group, _, Some(group_id)) => {
            Conditions::equals("asset.ownerGroupId", group_id)?
        }
        (Visibility::Group, _, None) => {
            return Err(AssetListError::InvalidScope(
                "GROUP files require an owner group".into(),
            ))
        }
        (Visibility::Public, None, None) => Conditions::is_null("asset.ownerUserId")?
            .and(Some(Conditions::is_null("asset.ownerGroupId")?)),
        (Visibility::Public, _, _) => {
            return Err(AssetListError::InvalidScope(
                "PUBLIC files cannot have an owner".into(),
            ))
        }
    };

    Ok(bucket.and(Some(ownership)))
}

/// Assets owned by any of `group_ids`. No groups matches nothing.
pub fn asset_group_scope(group_ids: &[i64]) -> Result<Predicate<Asset>, AssetListError> {
    Conditions::is_in("ownerGroupId", group_ids.iter().copied())
}

pub fn asset_owner_scope(user_id: i64) -> Result<Predicate<Asset>, AssetListError> {
    Conditions::equals("ownerUserId", user_id)
}
