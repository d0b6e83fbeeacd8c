use rolodex_core::{AppError, PageParams, Paginated};
use rolodex_db::{Changes, Filter, Repository, UnitOfWork};
use rolodex_models::validation::{optional_text, required_text};
use rolodex_models::{
    Contact, ContactDetail, ContactDetailId, ContactId, CreateContactDetailDto, DetailFilterParams,
    DetailType, UpdateContactDetailDto, UserId,
};
use tracing::instrument;

use crate::modules::contacts::service::ContactService;

pub struct ContactDetailService;

fn scope(user_id: UserId, contact_id: ContactId) -> Vec<Filter> {
    vec![
        Filter::eq("user_id", user_id),
        Filter::eq("contact_id", contact_id),
    ]
}

impl ContactDetailService {
    /// Inserts a detail under an already verified contact.
    pub(crate) async fn insert_detail(
        uow: &mut UnitOfWork,
        contact: &Contact,
        dto: CreateContactDetailDto,
    ) -> Result<ContactDetail, AppError> {
        let detail_type = DetailType::parse_field(&dto.detail_type)?;
        let value = required_text("value", &dto.value)?;

        Repository::<ContactDetail>::add(
            uow,
            &Changes::new()
                .set("contact_id", contact.id)
                .set("user_id", contact.user_id)
                .set("detail_type", detail_type)
                .set("value", value),
        )
        .await
    }

    #[instrument(skip(uow, dto), fields(detail_type = %dto.detail_type))]
    pub async fn add_detail(
        uow: &mut UnitOfWork,
        user_id: UserId,
        contact_id: ContactId,
        dto: CreateContactDetailDto,
    ) -> Result<ContactDetail, AppError> {
        let contact = ContactService::find_owned(uow, user_id, contact_id).await?;
        let detail = Self::insert_detail(uow, &contact, dto).await?;

        tracing::info!(detail_id = %detail.id, contact_id = %contact.id, "Contact detail added");
        Ok(detail)
    }

    #[instrument(skip(uow))]
    pub async fn list_details(
        uow: &mut UnitOfWork,
        user_id: UserId,
        contact_id: ContactId,
        filters: &DetailFilterParams,
        page: &PageParams,
    ) -> Result<Paginated<ContactDetail>, AppError> {
        ContactService::find_owned(uow, user_id, contact_id).await?;

        let mut scoped = scope(user_id, contact_id);
        scoped.extend(filters.to_filters()?);

        Repository::<ContactDetail>::paginate(uow, &scoped, page).await
    }

    #[instrument(skip(uow))]
    pub async fn get_detail(
        uow: &mut UnitOfWork,
        user_id: UserId,
        contact_id: ContactId,
        detail_id: ContactDetailId,
    ) -> Result<ContactDetail, AppError> {
        Repository::<ContactDetail>::get_by_id(uow, detail_id, &scope(user_id, contact_id)).await
    }

    #[instrument(skip(uow, dto))]
    pub async fn update_detail(
        uow: &mut UnitOfWork,
        user_id: UserId,
        contact_id: ContactId,
        detail_id: ContactDetailId,
        dto: UpdateContactDetailDto,
    ) -> Result<ContactDetail, AppError> {
        let detail_type = dto
            .detail_type
            .as_deref()
            .map(DetailType::parse_field)
            .transpose()?;

        let changes = Changes::new()
            .set_opt("detail_type", detail_type)
            .set_opt("value", optional_text("value", dto.value.as_deref())?);

        let mut filters = scope(user_id, contact_id);
        filters.push(Filter::eq("id", detail_id));

        Repository::<ContactDetail>::update_with_map(uow, &changes, &filters)
            .await?
            .into_iter()
            .next()
            .ok_or_else(Repository::<ContactDetail>::not_found)
    }

    #[instrument(skip(uow))]
    pub async fn delete_detail(
        uow: &mut UnitOfWork,
        user_id: UserId,
        contact_id: ContactId,
        detail_id: ContactDetailId,
    ) -> Result<(), AppError> {
        let mut filters = scope(user_id, contact_id);
        filters.push(Filter::eq("id", detail_id));

        if Repository::<ContactDetail>::delete(uow, &filters).await? == 0 {
            return Err(Repository::<ContactDetail>::not_found());
        }

        tracing::info!(detail_id = %detail_id, "Contact detail deleted");
        Ok(())
    }
}
