use crate::error::{Error, Result};

use super::{QueryParams, ResourceDescriptor};

const PAGE_NUMBER: &str = "page[number]";
const PAGE_SIZE: &str = "page[size]";

// NOTE: we use i64 because the db uses i64
/// Resolved pagination parameters of a list request
///
/// Query parameters:
/// * `page[number]`: the zero-based page to respond with (defaults to 0)
/// * `page[size]`: the number of items per page (defaults to the resource's
///   default page size, capped at its maximum)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    pub fn from_params(params: &QueryParams, descriptor: &ResourceDescriptor) -> Result<Self> {
        let number = match params.get(PAGE_NUMBER) {
            None => 0,
            Some(raw) => match raw.parse::<i64>() {
                Ok(number) if number >= 0 => number,
                _ => {
                    return Err(Error::invalid_parameter(
                        PAGE_NUMBER,
                        "expected a non-negative integer",
                    ))
                }
            },
        };

        let size = match params.get(PAGE_SIZE) {
            None => descriptor.default_page_size,
            Some(raw) => match raw.parse::<i64>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(Error::invalid_parameter(
                        PAGE_SIZE,
                        "expected a positive integer",
                    ))
                }
            },
        };

        Ok(Self {
            number,
            size: size.min(descriptor.max_page_size),
        })
    }

    /// Number of items skipped before this page
    pub fn offset(&self) -> i64 {
        self.number.saturating_mul(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::request::get;

    fn page(query: &str) -> Result<Page> {
        let request = get(&format!("/system/block{query}"));
        Page::from_params(&request.params, &ResourceDescriptor::default())
    }

    #[test]
    fn missing_parameters_use_defaults() {
        assert_eq!(page("").unwrap(), Page { number: 0, size: 25 });
    }

    #[test]
    fn size_is_capped() {
        let page = page("?page%5Bnumber%5D=2&page%5Bsize%5D=1000").unwrap();

        assert_eq!(page, Page { number: 2, size: 100 });
        assert_eq!(page.offset(), 200);
    }

    #[test]
    fn malformed_parameters_are_rejected() {
        for query in [
            "?page%5Bnumber%5D=-1",
            "?page%5Bnumber%5D=first",
            "?page%5Bnumber%5D=",
            "?page%5Bsize%5D=0",
            "?page%5Bsize%5D=-5",
            "?page%5Bsize%5D=many",
        ] {
            assert!(
                matches!(page(query), Err(Error::InvalidParameter(_))),
                "{query} should be rejected"
            );
        }
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page = page("?page%5Bnumber%5D=9223372036854775807").unwrap();
        assert_eq!(page.offset(), i64::MAX);
    }
}
