use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub success: bool,
    /// HTTP status code
    pub error: u16,
    pub message: String,
    /// Present on gate rejections
    pub code: Option<String>,
}

#[derive(ToSchema)]
pub struct CategoriesDoc {
    pub success: bool,
    /// Category id (as a string key) to category name
    pub categories: std::collections::HashMap<String, String>,
}

#[derive(ToSchema)]
pub struct QuestionDoc {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(ToSchema)]
pub struct QuestionPageDoc {
    pub success: bool,
    pub questions: Vec<QuestionDoc>,
    pub total_questions: u64,
    pub current_category: Option<i32>,
}

#[derive(ToSchema)]
pub struct NewQuestionDoc {
    pub question: String,
    pub answer: String,
    pub category: i32,
    /// 1 to 5
    pub difficulty: i32,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct SearchDoc {
    pub searchTerm: String,
}

#[derive(ToSchema)]
pub struct QuizCategoryDoc {
    /// 0 plays every category
    pub id: i32,
}

#[derive(ToSchema)]
pub struct QuizDoc {
    pub previous_questions: Vec<i32>,
    pub quiz_category: QuizCategoryDoc,
}

#[derive(ToSchema)]
pub struct SearchFormDoc { pub search_term: String }

#[derive(ToSchema)]
pub struct VenueFormDoc {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Repeat the key for several genres
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    /// Checkbox value such as `y`
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(ToSchema)]
pub struct ArtistFormDoc {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(ToSchema)]
pub struct NewShowDoc {
    pub artist_id: i32,
    pub venue_id: i32,
    /// `YYYY-MM-DD HH:MM:SS`
    pub start_time: String,
}

#[derive(ToSchema)]
pub struct IngredientDoc {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

#[derive(ToSchema)]
pub struct NewDrinkDoc {
    pub title: String,
    /// One ingredient or a list of them
    pub recipe: Vec<IngredientDoc>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::trivia::categories,
        crate::routes::trivia::questions,
        crate::routes::trivia::delete_question,
        crate::routes::trivia::create_question,
        crate::routes::trivia::search_questions,
        crate::routes::trivia::category_questions,
        crate::routes::trivia::next_quiz_question,
        crate::routes::booking::venues,
        crate::routes::booking::search_venues,
        crate::routes::booking::venue,
        crate::routes::booking::create_venue,
        crate::routes::booking::replace_venue,
        crate::routes::booking::delete_venue,
        crate::routes::booking::artists,
        crate::routes::booking::search_artists,
        crate::routes::booking::artist,
        crate::routes::booking::create_artist,
        crate::routes::booking::patch_artist,
        crate::routes::booking::delete_artist,
        crate::routes::booking::shows,
        crate::routes::booking::create_show,
        crate::routes::coffee::menu,
        crate::routes::coffee::details,
        crate::routes::coffee::create_drink,
        crate::routes::coffee::update_drink,
        crate::routes::coffee::delete_drink,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            CategoriesDoc,
            QuestionDoc,
            QuestionPageDoc,
            NewQuestionDoc,
            SearchDoc,
            QuizCategoryDoc,
            QuizDoc,
            SearchFormDoc,
            VenueFormDoc,
            ArtistFormDoc,
            NewShowDoc,
            IngredientDoc,
            NewDrinkDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "trivia"),
        (name = "booking"),
        (name = "coffee")
    )
)]
pub struct ApiDoc;
