use std::future::Future;

/// One page of a remote listing plus the offset handle of the page after it.
///
/// `next` is present iff the service reported more pages. The page is
/// consumed by [`collect_pages`] right after it is fetched.
#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub next: Option<u32>,
}

/// Accumulate every page of a remote listing into one ordered collection.
///
/// Calls `fetch_page` with `None` for the first page, then once per returned
/// `next` handle until a page reports no successor. Items keep their remote
/// order, so the 1-based position printed to the user stays valid for the
/// whole selection step. A failed page fetch fails the whole accumulation;
/// no partial collection is returned.
pub async fn collect_pages<T, E, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<u32>) -> Fut,
    Fut: Future<Output = Result<Listing<T>, E>>,
{
    let mut items = Vec::new();
    let mut next = None;

    loop {
        let listing = fetch_page(next).await?;
        items.extend(listing.items);
        match listing.next {
            Some(offset) => next = Some(offset),
            None => break,
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    // Serve `total` numbered items in pages of `page_size`, counting calls.
    fn page(total: usize, page_size: usize, offset: u32) -> Listing<usize> {
        let start = offset as usize;
        let end = total.min(start + page_size);
        let next = (end < total).then(|| end as u32);
        Listing {
            items: (start..end).collect(),
            next,
        }
    }

    async fn collect(total: usize, page_size: usize) -> (Vec<usize>, usize) {
        let calls = Cell::new(0usize);
        let items = collect_pages(|offset| {
            calls.set(calls.get() + 1);
            let listing = page(total, page_size, offset.unwrap_or(0));
            async move { Ok::<_, String>(listing) }
        })
        .await
        .unwrap();
        (items, calls.get())
    }

    #[tokio::test]
    async fn keeps_every_item_in_order_for_any_page_size() {
        for total in [0usize, 1, 25] {
            for page_size in [1usize, 10, 100] {
                let (items, calls) = collect(total, page_size).await;
                assert_eq!(items, (0..total).collect::<Vec<_>>());
                let expected_calls = total.div_ceil(page_size).max(1);
                assert_eq!(
                    calls, expected_calls,
                    "total={total} page_size={page_size}"
                );
            }
        }
    }

    #[tokio::test]
    async fn empty_listing_takes_a_single_call() {
        let (items, calls) = collect(0, 10).await;
        assert!(items.is_empty());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn page_error_fails_the_whole_accumulation() {
        let calls = Cell::new(0usize);
        let result: Result<Vec<usize>, String> = collect_pages(|offset| {
            calls.set(calls.get() + 1);
            let listing = page(25, 10, offset.unwrap_or(0));
            let fail = offset == Some(10);
            async move {
                if fail {
                    Err("connection reset".to_string())
                } else {
                    Ok(listing)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), "connection reset");
        // First page succeeded, second failed, third never requested.
        assert_eq!(calls.get(), 2);
    }
}
