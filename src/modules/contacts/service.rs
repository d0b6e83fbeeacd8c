use std::collections::HashMap;

use rolodex_core::{AppError, PageParams, Paginated};
use rolodex_db::{Changes, Filter, Repository, UnitOfWork};
use rolodex_models::validation::{optional_text, required_text};
use rolodex_models::{
    Contact, ContactDetail, ContactFilterParams, ContactId, ContactWithDetails, CreateContactDto,
    UpdateContactDto, User, UserId,
};
use tracing::instrument;

use crate::metrics::track_contact_created;
use crate::modules::contact_details::service::ContactDetailService;

pub struct ContactService;

impl ContactService {
    /// Creates the contact and any inline details in the caller's unit of work.
    #[instrument(skip(uow, dto), fields(details = dto.details.len()))]
    pub async fn create_contact(
        uow: &mut UnitOfWork,
        user_id: UserId,
        dto: CreateContactDto,
    ) -> Result<ContactWithDetails, AppError> {
        let first_name = required_text("first_name", &dto.first_name)?;
        let last_name = required_text("last_name", &dto.last_name)?;

        Repository::<User>::get_by_id(uow, user_id, &[]).await?;

        let contact = Repository::<Contact>::add(
            uow,
            &Changes::new()
                .set("user_id", user_id)
                .set("first_name", first_name)
                .set("last_name", last_name),
        )
        .await?;

        let mut details = Vec::with_capacity(dto.details.len());
        for detail in dto.details {
            details.push(ContactDetailService::insert_detail(uow, &contact, detail).await?);
        }

        track_contact_created();
        tracing::info!(contact_id = %contact.id, "Contact created");

        Ok(ContactWithDetails { contact, details })
    }

    #[instrument(skip(uow))]
    pub async fn list_contacts(
        uow: &mut UnitOfWork,
        user_id: UserId,
        filters: &ContactFilterParams,
        page: &PageParams,
    ) -> Result<Paginated<ContactWithDetails>, AppError> {
        let mut scope = vec![Filter::eq("user_id", user_id)];
        scope.extend(filters.to_filters());

        let contacts = Repository::<Contact>::paginate(uow, &scope, page).await?;

        let ids: Vec<ContactId> = contacts.data.iter().map(|c| c.id).collect();
        let mut by_contact: HashMap<ContactId, Vec<ContactDetail>> = HashMap::new();
        for detail in Repository::<ContactDetail>::get_all(
            uow,
            &[Filter::eq("user_id", user_id), Filter::one_of("contact_id", ids)],
            None,
        )
        .await?
        {
            by_contact.entry(detail.contact_id).or_default().push(detail);
        }

        Ok(contacts.map(|contact| {
            let details = by_contact.remove(&contact.id).unwrap_or_default();
            ContactWithDetails { contact, details }
        }))
    }

    #[instrument(skip(uow))]
    pub async fn get_contact(
        uow: &mut UnitOfWork,
        user_id: UserId,
        contact_id: ContactId,
    ) -> Result<ContactWithDetails, AppError> {
        let contact = Self::find_owned(uow, user_id, contact_id).await?;
        Self::with_details(uow, contact).await
    }

    #[instrument(skip(uow, dto))]
    pub async fn update_contact(
        uow: &mut UnitOfWork,
        user_id: UserId,
        contact_id: ContactId,
        dto: UpdateContactDto,
    ) -> Result<ContactWithDetails, AppError> {
        let changes = Changes::new()
            .set_opt("first_name", optional_text("first_name", dto.first_name.as_deref())?)
            .set_opt("last_name", optional_text("last_name", dto.last_name.as_deref())?);

        let contact = Repository::<Contact>::update_with_map(
            uow,
            &changes,
            &[Filter::eq("id", contact_id), Filter::eq("user_id", user_id)],
        )
        .await?
        .into_iter()
        .next()
        .ok_or_else(Repository::<Contact>::not_found)?;

        Self::with_details(uow, contact).await
    }

    /// Soft-deletes the contact and its details.
    #[instrument(skip(uow))]
    pub async fn delete_contact(
        uow: &mut UnitOfWork,
        user_id: UserId,
        contact_id: ContactId,
    ) -> Result<(), AppError> {
        let deleted = Repository::<Contact>::delete(
            uow,
            &[Filter::eq("id", contact_id), Filter::eq("user_id", user_id)],
        )
        .await?;
        if deleted == 0 {
            return Err(Repository::<Contact>::not_found());
        }

        let details = Repository::<ContactDetail>::delete(
            uow,
            &[Filter::eq("contact_id", contact_id), Filter::eq("user_id", user_id)],
        )
        .await?;

        tracing::info!(contact_id = %contact_id, details, "Contact deleted");
        Ok(())
    }

    /// The user's active contact, or 404 for both missing and foreign contacts.
    pub async fn find_owned(
        uow: &mut UnitOfWork,
        user_id: UserId,
        contact_id: ContactId,
    ) -> Result<Contact, AppError> {
        Repository::<Contact>::get_by_id(uow, contact_id, &[Filter::eq("user_id", user_id)]).await
    }

    async fn with_details(
        uow: &mut UnitOfWork,
        contact: Contact,
    ) -> Result<ContactWithDetails, AppError> {
        let details = Repository::<ContactDetail>::get_all(
            uow,
            &[
                Filter::eq("contact_id", contact.id),
                Filter::eq("user_id", contact.user_id),
            ],
            None,
        )
        .await?;

        Ok(ContactWithDetails { contact, details })
    }
}
