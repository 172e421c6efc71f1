use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_geography_tables::Migration),
            Box::new(m20240601_000002_create_hotel_reference_tables::Migration),
            Box::new(m20240601_000003_create_hotel_features_table::Migration),
            Box::new(m20240601_000004_create_hotel_cards_table::Migration),
            Box::new(m20240601_000005_create_hotel_content_tables::Migration),
        ]
    }
}

fn created_at<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn updated_at<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

// Migration implementations

mod m20240601_000001_create_geography_tables {
    use super::{created_at, updated_at};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_geography_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Countries::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Countries::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Countries::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Countries::Code)
                                .string_len(2)
                                .not_null()
                                .unique_key(),
                        )
                        .col(created_at(Countries::CreatedAt))
                        .col(updated_at(Countries::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Cities::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Cities::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Cities::CountryId).uuid().not_null())
                        .col(ColumnDef::new(Cities::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Cities::Latitude).double().not_null())
                        .col(ColumnDef::new(Cities::Longitude).double().not_null())
                        .col(created_at(Cities::CreatedAt))
                        .col(updated_at(Cities::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_cities_country_id")
                                .from(Cities::Table, Cities::CountryId)
                                .to(Countries::Table, Countries::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_cities_country_name")
                        .table(Cities::Table)
                        .col(Cities::CountryId)
                        .col(Cities::Name)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Neighborhoods::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Neighborhoods::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Neighborhoods::CityId).uuid().not_null())
                        .col(ColumnDef::new(Neighborhoods::Name).string_len(100).not_null())
                        .col(created_at(Neighborhoods::CreatedAt))
                        .col(updated_at(Neighborhoods::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_neighborhoods_city_id")
                                .from(Neighborhoods::Table, Neighborhoods::CityId)
                                .to(Cities::Table, Cities::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_neighborhoods_city_name")
                        .table(Neighborhoods::Table)
                        .col(Neighborhoods::CityId)
                        .col(Neighborhoods::Name)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Addresses::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Addresses::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Addresses::Street).string_len(255).not_null())
                        .col(ColumnDef::new(Addresses::PostalCode).string_len(20).null())
                        .col(ColumnDef::new(Addresses::CityId).uuid().not_null())
                        .col(ColumnDef::new(Addresses::NeighborhoodId).uuid().null())
                        .col(ColumnDef::new(Addresses::Latitude).double().null())
                        .col(ColumnDef::new(Addresses::Longitude).double().null())
                        .col(created_at(Addresses::CreatedAt))
                        .col(updated_at(Addresses::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_addresses_city_id")
                                .from(Addresses::Table, Addresses::CityId)
                                .to(Cities::Table, Cities::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_addresses_neighborhood_id")
                                .from(Addresses::Table, Addresses::NeighborhoodId)
                                .to(Neighborhoods::Table, Neighborhoods::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_addresses_city_id")
                        .table(Addresses::Table)
                        .col(Addresses::CityId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                Addresses::Table.into_iden(),
                Neighborhoods::Table.into_iden(),
                Cities::Table.into_iden(),
                Countries::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).if_exists().to_owned())
                    .await?;
            }
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub enum Countries {
        Table,
        Id,
        Name,
        Code,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Cities {
        Table,
        Id,
        CountryId,
        Name,
        Latitude,
        Longitude,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Neighborhoods {
        Table,
        Id,
        CityId,
        Name,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Addresses {
        Table,
        Id,
        Street,
        PostalCode,
        CityId,
        NeighborhoodId,
        Latitude,
        Longitude,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000002_create_hotel_reference_tables {
    use super::m20240601_000001_create_geography_tables::Cities;
    use super::{created_at, updated_at};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_hotel_reference_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Destinations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Destinations::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Destinations::CityId).uuid().not_null())
                        .col(ColumnDef::new(Destinations::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Destinations::Description).text().null())
                        .col(ColumnDef::new(Destinations::Kind).string_len(32).not_null())
                        .col(created_at(Destinations::CreatedAt))
                        .col(updated_at(Destinations::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_destinations_city_id")
                                .from(Destinations::Table, Destinations::CityId)
                                .to(Cities::Table, Cities::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_destinations_city_name")
                        .table(Destinations::Table)
                        .col(Destinations::CityId)
                        .col(Destinations::Name)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(AccommodationTypes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AccommodationTypes::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AccommodationTypes::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(AccommodationTypes::Description).text().null())
                        .col(created_at(AccommodationTypes::CreatedAt))
                        .col(updated_at(AccommodationTypes::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(HotelGroups::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(HotelGroups::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(HotelGroups::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(HotelGroups::Website).string_len(255).null())
                        .col(created_at(HotelGroups::CreatedAt))
                        .col(updated_at(HotelGroups::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ParkingOptions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ParkingOptions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ParkingOptions::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ParkingOptions::Location).string_len(16).not_null())
                        .col(ColumnDef::new(ParkingOptions::PricePerDay).double().null())
                        .col(
                            ColumnDef::new(ParkingOptions::ReservationRequired)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(created_at(ParkingOptions::CreatedAt))
                        .col(updated_at(ParkingOptions::UpdatedAt))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                ParkingOptions::Table.into_iden(),
                HotelGroups::Table.into_iden(),
                AccommodationTypes::Table.into_iden(),
                Destinations::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).if_exists().to_owned())
                    .await?;
            }
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub enum Destinations {
        Table,
        Id,
        CityId,
        Name,
        Description,
        Kind,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum AccommodationTypes {
        Table,
        Id,
        Name,
        Description,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum HotelGroups {
        Table,
        Id,
        Name,
        Website,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum ParkingOptions {
        Table,
        Id,
        Name,
        Location,
        PricePerDay,
        ReservationRequired,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000003_create_hotel_features_table {
    use super::{created_at, updated_at};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000003_create_hotel_features_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Amenities, labels, highlights and accessibility options share one table.
            manager
                .create_table(
                    Table::create()
                        .table(HotelFeatures::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(HotelFeatures::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(HotelFeatures::Kind).string_len(16).not_null())
                        .col(ColumnDef::new(HotelFeatures::Name).string_len(100).not_null())
                        .col(ColumnDef::new(HotelFeatures::Description).text().null())
                        .col(ColumnDef::new(HotelFeatures::Icon).string_len(64).null())
                        .col(created_at(HotelFeatures::CreatedAt))
                        .col(updated_at(HotelFeatures::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_hotel_features_kind_name")
                        .table(HotelFeatures::Table)
                        .col(HotelFeatures::Kind)
                        .col(HotelFeatures::Name)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(HotelFeatures::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum HotelFeatures {
        Table,
        Id,
        Kind,
        Name,
        Description,
        Icon,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000004_create_hotel_cards_table {
    use super::m20240601_000001_create_geography_tables::{Addresses, Cities};
    use super::m20240601_000002_create_hotel_reference_tables::{
        AccommodationTypes, Destinations, HotelGroups, ParkingOptions,
    };
    use super::m20240601_000003_create_hotel_features_table::HotelFeatures;
    use super::{created_at, updated_at};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000004_create_hotel_cards_table"
        }
    }

    fn optional_reference(
        name: &str,
        column: HotelCards,
        table: impl IntoTableRef,
        id: impl IntoIden,
    ) -> ForeignKeyCreateStatement {
        ForeignKey::create()
            .name(name)
            .from(HotelCards::Table, column)
            .to(table, id)
            .on_delete(ForeignKeyAction::Restrict)
            .to_owned()
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(HotelCards::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(HotelCards::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(HotelCards::Name).string_len(200).not_null())
                        .col(
                            ColumnDef::new(HotelCards::Slug)
                                .string_len(200)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(HotelCards::Description).text().null())
                        .col(ColumnDef::new(HotelCards::StarRating).integer().not_null())
                        .col(ColumnDef::new(HotelCards::PricePerNight).double().not_null())
                        .col(
                            ColumnDef::new(HotelCards::Currency)
                                .string_len(3)
                                .not_null()
                                .default("USD"),
                        )
                        .col(ColumnDef::new(HotelCards::CityId).uuid().not_null())
                        .col(ColumnDef::new(HotelCards::DestinationId).uuid().null())
                        .col(ColumnDef::new(HotelCards::AccommodationTypeId).uuid().null())
                        .col(ColumnDef::new(HotelCards::HotelGroupId).uuid().null())
                        .col(ColumnDef::new(HotelCards::ParkingOptionId).uuid().null())
                        .col(ColumnDef::new(HotelCards::AddressId).uuid().null())
                        .col(ColumnDef::new(HotelCards::Latitude).double().null())
                        .col(ColumnDef::new(HotelCards::Longitude).double().null())
                        .col(ColumnDef::new(HotelCards::ImageUrl).string_len(500).null())
                        .col(
                            ColumnDef::new(HotelCards::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(created_at(HotelCards::CreatedAt))
                        .col(updated_at(HotelCards::UpdatedAt))
                        .foreign_key(&mut optional_reference(
                            "fk_hotel_cards_city_id",
                            HotelCards::CityId,
                            Cities::Table,
                            Cities::Id,
                        ))
                        .foreign_key(&mut optional_reference(
                            "fk_hotel_cards_destination_id",
                            HotelCards::DestinationId,
                            Destinations::Table,
                            Destinations::Id,
                        ))
                        .foreign_key(&mut optional_reference(
                            "fk_hotel_cards_accommodation_type_id",
                            HotelCards::AccommodationTypeId,
                            AccommodationTypes::Table,
                            AccommodationTypes::Id,
                        ))
                        .foreign_key(&mut optional_reference(
                            "fk_hotel_cards_hotel_group_id",
                            HotelCards::HotelGroupId,
                            HotelGroups::Table,
                            HotelGroups::Id,
                        ))
                        .foreign_key(&mut optional_reference(
                            "fk_hotel_cards_parking_option_id",
                            HotelCards::ParkingOptionId,
                            ParkingOptions::Table,
                            ParkingOptions::Id,
                        ))
                        .foreign_key(&mut optional_reference(
                            "fk_hotel_cards_address_id",
                            HotelCards::AddressId,
                            Addresses::Table,
                            Addresses::Id,
                        ))
                        .to_owned(),
                )
                .await?;

            for (name, column) in [
                ("idx_hotel_cards_city_id", HotelCards::CityId),
                ("idx_hotel_cards_price", HotelCards::PricePerNight),
                ("idx_hotel_cards_star_rating", HotelCards::StarRating),
            ] {
                manager
                    .create_index(
                        Index::create()
                            .name(name)
                            .table(HotelCards::Table)
                            .col(column)
                            .to_owned(),
                    )
                    .await?;
            }

            manager
                .create_table(
                    Table::create()
                        .table(HotelCardFeatures::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(HotelCardFeatures::HotelCardId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(HotelCardFeatures::FeatureId).uuid().not_null())
                        .primary_key(
                            Index::create()
                                .col(HotelCardFeatures::HotelCardId)
                                .col(HotelCardFeatures::FeatureId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_card_features_hotel_card_id")
                                .from(HotelCardFeatures::Table, HotelCardFeatures::HotelCardId)
                                .to(HotelCards::Table, HotelCards::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_card_features_feature_id")
                                .from(HotelCardFeatures::Table, HotelCardFeatures::FeatureId)
                                .to(HotelFeatures::Table, HotelFeatures::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_hotel_card_features_feature_id")
                        .table(HotelCardFeatures::Table)
                        .col(HotelCardFeatures::FeatureId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(HotelCardFeatures::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(HotelCards::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    pub enum HotelCards {
        Table,
        Id,
        Name,
        Slug,
        Description,
        StarRating,
        PricePerNight,
        Currency,
        CityId,
        DestinationId,
        AccommodationTypeId,
        HotelGroupId,
        ParkingOptionId,
        AddressId,
        Latitude,
        Longitude,
        ImageUrl,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum HotelCardFeatures {
        Table,
        HotelCardId,
        FeatureId,
    }
}

mod m20240601_000005_create_hotel_content_tables {
    use super::m20240601_000004_create_hotel_cards_table::HotelCards;
    use super::{created_at, updated_at};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000005_create_hotel_content_tables"
        }
    }

    fn belongs_to_hotel(
        name: &str,
        table: impl IntoTableRef,
        column: impl IntoIden,
    ) -> ForeignKeyCreateStatement {
        ForeignKey::create()
            .name(name)
            .from(table, column)
            .to(HotelCards::Table, HotelCards::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .to_owned()
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(HotelReviews::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(HotelReviews::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(HotelReviews::HotelCardId).uuid().not_null())
                        .col(ColumnDef::new(HotelReviews::AuthorName).string_len(100).not_null())
                        .col(ColumnDef::new(HotelReviews::Rating).integer().not_null())
                        .col(ColumnDef::new(HotelReviews::Title).string_len(200).null())
                        .col(ColumnDef::new(HotelReviews::Comment).text().null())
                        .col(ColumnDef::new(HotelReviews::StayDate).date().null())
                        .col(created_at(HotelReviews::CreatedAt))
                        .foreign_key(&mut belongs_to_hotel(
                            "fk_hotel_reviews_hotel_card_id",
                            HotelReviews::Table,
                            HotelReviews::HotelCardId,
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_hotel_reviews_hotel_created")
                        .table(HotelReviews::Table)
                        .col(HotelReviews::HotelCardId)
                        .col(HotelReviews::CreatedAt)
                        .to_owned(),
                )
                .await?;

            // (hotel, kind) uniqueness is enforced by the service because `other` may repeat.
            manager
                .create_table(
                    Table::create()
                        .table(HotelPolicies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(HotelPolicies::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(HotelPolicies::HotelCardId).uuid().not_null())
                        .col(ColumnDef::new(HotelPolicies::Kind).string_len(16).not_null())
                        .col(ColumnDef::new(HotelPolicies::Description).text().not_null())
                        .col(created_at(HotelPolicies::CreatedAt))
                        .col(updated_at(HotelPolicies::UpdatedAt))
                        .foreign_key(&mut belongs_to_hotel(
                            "fk_hotel_policies_hotel_card_id",
                            HotelPolicies::Table,
                            HotelPolicies::HotelCardId,
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(HotelRooms::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(HotelRooms::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(HotelRooms::HotelCardId).uuid().not_null())
                        .col(ColumnDef::new(HotelRooms::Name).string_len(100).not_null())
                        .col(ColumnDef::new(HotelRooms::Capacity).integer().not_null())
                        .col(ColumnDef::new(HotelRooms::BedType).string_len(50).null())
                        .col(ColumnDef::new(HotelRooms::PricePerNight).double().not_null())
                        .col(
                            ColumnDef::new(HotelRooms::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(created_at(HotelRooms::CreatedAt))
                        .col(updated_at(HotelRooms::UpdatedAt))
                        .foreign_key(&mut belongs_to_hotel(
                            "fk_hotel_rooms_hotel_card_id",
                            HotelRooms::Table,
                            HotelRooms::HotelCardId,
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_hotel_rooms_hotel_name")
                        .table(HotelRooms::Table)
                        .col(HotelRooms::HotelCardId)
                        .col(HotelRooms::Name)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(HotelDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(HotelDetails::HotelCardId)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(HotelDetails::CheckInFrom).string_len(5).null())
                        .col(ColumnDef::new(HotelDetails::CheckOutUntil).string_len(5).null())
                        .col(ColumnDef::new(HotelDetails::TotalRooms).integer().null())
                        .col(ColumnDef::new(HotelDetails::YearBuilt).integer().null())
                        .col(ColumnDef::new(HotelDetails::Phone).string_len(32).null())
                        .col(ColumnDef::new(HotelDetails::Email).string_len(255).null())
                        .col(ColumnDef::new(HotelDetails::Website).string_len(255).null())
                        .col(updated_at(HotelDetails::UpdatedAt))
                        .foreign_key(&mut belongs_to_hotel(
                            "fk_hotel_details_hotel_card_id",
                            HotelDetails::Table,
                            HotelDetails::HotelCardId,
                        ))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                HotelDetails::Table.into_iden(),
                HotelRooms::Table.into_iden(),
                HotelPolicies::Table.into_iden(),
                HotelReviews::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).if_exists().to_owned())
                    .await?;
            }
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum HotelReviews {
        Table,
        Id,
        HotelCardId,
        AuthorName,
        Rating,
        Title,
        Comment,
        StayDate,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum HotelPolicies {
        Table,
        Id,
        HotelCardId,
        Kind,
        Description,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum HotelRooms {
        Table,
        Id,
        HotelCardId,
        Name,
        Capacity,
        BedType,
        PricePerNight,
        Quantity,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum HotelDetails {
        Table,
        HotelCardId,
        CheckInFrom,
        CheckOutUntil,
        TotalRooms,
        YearBuilt,
        Phone,
        Email,
        Website,
        UpdatedAt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn migration_names_are_unique_and_ordered() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        let distinct: HashSet<&String> = names.iter().collect();
        assert_eq!(distinct.len(), names.len());

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(sorted, names);
        assert!(names.iter().all(|n| n.starts_with("m20240601_")));
    }
}
