//! Query layer shared by every resource: a filter, an optional page, and the
//! total count of the filtered set.
//!
//! Results carry no explicit ordering; callers must not rely on row order.

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoSimpleExpr, PaginatorTrait, QueryFilter, Value,
};

use crate::{errors::ServiceError, pagination::Pagination};

/// Row filter over one column of an entity.
#[derive(Clone, Debug)]
pub enum ListFilter<C> {
    All,
    /// Exact equality, typically a foreign key.
    Eq(C, Value),
    /// Case-insensitive substring match on a text column.
    Contains(C, String),
}

impl<C: ColumnTrait> ListFilter<C> {
    pub fn condition(&self) -> Condition {
        match self {
            ListFilter::All => Condition::all(),
            ListFilter::Eq(col, value) => Condition::all().add(col.eq(value.clone())),
            ListFilter::Contains(col, term) => {
                let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
                Condition::all().add(
                    Expr::expr(Func::lower(col.into_simple_expr()))
                        .like(LikeExpr::new(pattern).escape('\\')),
                )
            }
        }
    }
}

/// Escape LIKE wildcards so the term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// One page of a filtered listing.
#[derive(Clone, Debug, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    /// Size of the whole filtered set, not just this page.
    pub total: u64,
}

impl<T> PageResult<T> {
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult { items: self.items.into_iter().map(f).collect(), total: self.total }
    }
}

/// Fetch the filtered set, optionally sliced to one page.
///
/// Without a page every matching row is returned and `total` equals the
/// number of items. Page 0 yields no items.
pub async fn list<E, C>(
    db: &C,
    filter: &ListFilter<E::Column>,
    page: Option<Pagination>,
) -> Result<PageResult<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let select = E::find().filter(filter.condition());
    match page {
        None => {
            let items = select.all(db).await?;
            let total = items.len() as u64;
            Ok(PageResult { items, total })
        }
        Some(p) if p.is_before_first() => {
            let total = select.count(db).await?;
            Ok(PageResult { items: Vec::new(), total })
        }
        Some(p) => {
            let (page_idx, per_page) = p.normalize();
            // SeaORM's paginate uses 0-based page index internally via fetch_page
            let paginator = select.paginate(db, per_page);
            let total = paginator.num_items().await?;
            let items = paginator.fetch_page(page_idx).await?;
            Ok(PageResult { items, total })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::category;
    use sea_orm::{ActiveModelTrait, Set};

    async fn seed(db: &sea_orm::DatabaseConnection, names: &[&str]) -> anyhow::Result<()> {
        for n in names {
            category::ActiveModel { kind: Set(n.to_string()), ..Default::default() }
                .insert(db)
                .await?;
        }
        Ok(())
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[tokio::test]
    async fn contains_is_case_insensitive_substring() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed(&db, &["The Great Show", "Theatre", "showcase"]).await?;

        let filter = ListFilter::Contains(category::Column::Kind, "SHOW".to_string());
        let res = list::<category::Entity, _>(&db, &filter, None).await?;
        let mut kinds: Vec<_> = res.items.into_iter().map(|c| c.kind).collect();
        kinds.sort();
        assert_eq!(kinds, vec!["The Great Show".to_string(), "showcase".to_string()]);
        assert_eq!(res.total, 2);
        Ok(())
    }

    #[tokio::test]
    async fn contains_treats_wildcards_literally() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed(&db, &["100% Juice", "1000 Juice"]).await?;
        let filter = ListFilter::Contains(category::Column::Kind, "0%".to_string());
        let res = list::<category::Entity, _>(&db, &filter, None).await?;
        assert_eq!(res.total, 1);
        assert_eq!(res.items[0].kind, "100% Juice");
        Ok(())
    }

    #[tokio::test]
    async fn pages_slice_the_filtered_set() -> anyhow::Result<()> {
        let db = get_db().await?;
        let names: Vec<String> = (0..12).map(|i| format!("cat-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        seed(&db, &refs).await?;

        let page1 = list::<category::Entity, _>(&db, &ListFilter::All, Some(Pagination::new(1, 10))).await?;
        let page2 = list::<category::Entity, _>(&db, &ListFilter::All, Some(Pagination::new(2, 10))).await?;
        let page3 = list::<category::Entity, _>(&db, &ListFilter::All, Some(Pagination::new(3, 10))).await?;
        let page0 = list::<category::Entity, _>(&db, &ListFilter::All, Some(Pagination::new(0, 10))).await?;
        assert_eq!(page1.items.len(), 10);
        assert_eq!(page2.items.len(), 2);
        assert!(page3.is_empty());
        assert!(page0.is_empty());
        assert_eq!(page0.total, 12);
        assert_eq!(page1.total, 12);
        assert_eq!(page3.total, 12);
        Ok(())
    }

    #[tokio::test]
    async fn eq_filters_on_exact_value() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed(&db, &["Science", "Art"]).await?;
        let filter = ListFilter::Eq(category::Column::Kind, "Art".into());
        let res = list::<category::Entity, _>(&db, &filter, None).await?;
        assert_eq!(res.items.len(), 1);
        assert_eq!(res.items[0].kind, "Art");
        Ok(())
    }
}
