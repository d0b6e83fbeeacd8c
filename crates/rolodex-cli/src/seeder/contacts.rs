//! Fake contacts with email and phone details.

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rayon::prelude::*;
use rolodex_models::{ContactId, DetailType, UserId};
use sqlx::{Postgres, QueryBuilder, Transaction};

use super::models::{ContactSeed, DetailSeed};

const BATCH_SIZE: usize = 1000;

/// Details alternate between email and phone, starting with email.
pub fn generate_contacts(
    user_ids: &[UserId],
    contacts_per_user: usize,
    details_per_contact: usize,
) -> Vec<ContactSeed> {
    user_ids
        .par_iter()
        .flat_map_iter(|&user_id| {
            (0..contacts_per_user).map(move |_| ContactSeed {
                user_id,
                first_name: FirstName().fake(),
                last_name: LastName().fake(),
                details: (0..details_per_contact).map(generate_detail).collect(),
            })
        })
        .collect()
}

fn generate_detail(idx: usize) -> DetailSeed {
    if idx % 2 == 0 {
        DetailSeed {
            detail_type: DetailType::Email,
            value: SafeEmail().fake(),
        }
    } else {
        DetailSeed {
            detail_type: DetailType::Phone,
            value: PhoneNumber().fake(),
        }
    }
}

/// Inserts the contacts and then their details; returns the number of details.
pub async fn insert_contacts(
    tx: &mut Transaction<'static, Postgres>,
    contacts: &[ContactSeed],
) -> Result<usize, sqlx::Error> {
    let mut detail_rows: Vec<(ContactId, UserId, &DetailSeed)> = Vec::new();

    for chunk in contacts.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::new("INSERT INTO contacts (user_id, first_name, last_name) ");
        qb.push_values(chunk, |mut row, contact| {
            row.push_bind(contact.user_id)
                .push_bind(&contact.first_name)
                .push_bind(&contact.last_name);
        });
        qb.push(" RETURNING id");

        let ids: Vec<ContactId> = qb.build_query_scalar().fetch_all(&mut **tx).await?;
        for (id, contact) in ids.into_iter().zip(chunk) {
            detail_rows.extend(contact.details.iter().map(|d| (id, contact.user_id, d)));
        }
    }

    for chunk in detail_rows.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::new(
            "INSERT INTO contact_details (contact_id, user_id, detail_type, value) ",
        );
        qb.push_values(chunk, |mut row, (contact_id, user_id, detail)| {
            row.push_bind(*contact_id)
                .push_bind(*user_id)
                .push_bind(detail.detail_type.as_str())
                .push_bind(&detail.value);
        });
        qb.build().execute(&mut **tx).await?;
    }

    Ok(detail_rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_contacts_counts() {
        let users = [UserId::new(), UserId::new()];
        let contacts = generate_contacts(&users, 3, 2);

        assert_eq!(contacts.len(), 6);
        assert!(contacts.iter().all(|c| c.details.len() == 2));
        assert_eq!(contacts.iter().filter(|c| c.user_id == users[0]).count(), 3);
    }

    #[test]
    fn test_details_alternate_types() {
        let contacts = generate_contacts(&[UserId::new()], 1, 3);
        let types: Vec<_> = contacts[0].details.iter().map(|d| d.detail_type).collect();

        assert_eq!(
            types,
            vec![DetailType::Email, DetailType::Phone, DetailType::Email]
        );
    }
}
