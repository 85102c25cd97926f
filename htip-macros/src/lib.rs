use proc_macro::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{parse_macro_input, ItemStruct};

/// Generate a zero-copy reader/writer for a fixed-layout, big-endian record.
///
/// Every field becomes a getter (and a `set_` writer) at the offset given by
/// the sum of the previous field sizes. Integer fields take their natural
/// width unless `#[bytes(n)]` says otherwise (`u32` accepts 3). A `&[u8]`
/// field needs `#[bytes(n)]`; `#[bytes(0)]` marks the variable-length tail
/// and must come last.
///
/// The generated `new` refers to `crate::Error` and `crate::Result`, so the
/// macro is meant for use inside the `htip-frame` crate.
#[proc_macro_attribute]
pub fn frame(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);

    let item_attr = input.attrs;
    let name = input.ident;

    let mut f = quote! {
        #(#item_attr)*
        pub struct #name<T: AsRef<[u8]>> {
            buffer: T,
        }
    };

    let mut getters = vec![];
    let mut setters = vec![];

    let mut offset = 0usize;

    for field in input.fields {
        let fnname = field.ident.unwrap();
        let setname = format_ident!("set_{}", fnname);
        let ty = field.ty;
        let ty_name = ty.to_token_stream().to_string();

        let doc = field.attrs.iter().find(|attr| attr.path().is_ident("doc"));
        let set_doc = format!("Set the `{fnname}` field.");

        let bytes = field
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident("bytes"))
            .map(|attr| {
                attr.parse_args::<syn::LitInt>()
                    .unwrap()
                    .base10_parse::<usize>()
                    .unwrap()
            });

        let bytes = match bytes {
            Some(bytes) => bytes,
            None => match ty_name.as_str() {
                "u8" => 1,
                "u16" => 2,
                "u32" => 4,
                _ => panic!("field `{fnname}` needs a #[bytes(n)] attribute"),
            },
        };

        match ty_name.as_str() {
            "u8" => {
                getters.push(quote! {
                    #doc
                    pub fn #fnname(&self) -> u8 {
                        self.buffer.as_ref()[#offset]
                    }
                });
                setters.push(quote! {
                    #[doc = #set_doc]
                    pub fn #setname(&mut self, value: u8) {
                        self.buffer.as_mut()[#offset] = value;
                    }
                });
            }
            "u16" => {
                getters.push(quote! {
                    #doc
                    pub fn #fnname(&self) -> u16 {
                        let b = &self.buffer.as_ref()[#offset..];
                        u16::from_be_bytes([b[0], b[1]])
                    }
                });
                setters.push(quote! {
                    #[doc = #set_doc]
                    pub fn #setname(&mut self, value: u16) {
                        self.buffer.as_mut()[#offset..][..2].copy_from_slice(&value.to_be_bytes());
                    }
                });
            }
            "u32" if bytes == 3 => {
                getters.push(quote! {
                    #doc
                    pub fn #fnname(&self) -> u32 {
                        let b = &self.buffer.as_ref()[#offset..];
                        u32::from_be_bytes([0, b[0], b[1], b[2]])
                    }
                });
                setters.push(quote! {
                    #[doc = #set_doc]
                    pub fn #setname(&mut self, value: u32) {
                        self.buffer.as_mut()[#offset..][..3]
                            .copy_from_slice(&value.to_be_bytes()[1..]);
                    }
                });
            }
            "u32" => {
                getters.push(quote! {
                    #doc
                    pub fn #fnname(&self) -> u32 {
                        let b = &self.buffer.as_ref()[#offset..];
                        u32::from_be_bytes([b[0], b[1], b[2], b[3]])
                    }
                });
                setters.push(quote! {
                    #[doc = #set_doc]
                    pub fn #setname(&mut self, value: u32) {
                        self.buffer.as_mut()[#offset..][..4].copy_from_slice(&value.to_be_bytes());
                    }
                });
            }
            "& [u8]" if bytes == 0 => {
                getters.push(quote! {
                    #doc
                    pub fn #fnname(&self) -> &[u8] {
                        &self.buffer.as_ref()[#offset..]
                    }
                });
                setters.push(quote! {
                    #[doc = #set_doc]
                    pub fn #setname(&mut self, value: &[u8]) {
                        self.buffer.as_mut()[#offset..][..value.len()].copy_from_slice(value);
                    }
                });
            }
            "& [u8]" => {
                getters.push(quote! {
                    #doc
                    pub fn #fnname(&self) -> &[u8] {
                        &self.buffer.as_ref()[#offset..][..#bytes]
                    }
                });
                setters.push(quote! {
                    #[doc = #set_doc]
                    pub fn #setname(&mut self, value: &[u8]) {
                        self.buffer.as_mut()[#offset..][..#bytes].copy_from_slice(value);
                    }
                });
            }
            other => panic!("unsupported field type `{other}` for `{fnname}`"),
        }

        offset += bytes;
    }

    f.extend(quote! {
        impl<T: AsRef<[u8]>> #name<T> {
            /// Create a new reader, checking that the buffer holds every
            /// fixed-size field.
            ///
            /// # Errors
            ///
            /// Returns [`crate::Error::TruncatedPayload`] if the buffer is too
            /// short.
            pub fn new(buffer: T) -> crate::Result<Self> {
                let reader = Self::new_unchecked(buffer);

                if reader.buffer.as_ref().len() < Self::size() {
                    return Err(crate::Error::TruncatedPayload);
                }

                Ok(reader)
            }

            /// Create a new reader without length checking.
            pub fn new_unchecked(buffer: T) -> Self {
                Self { buffer }
            }

            /// Returns the size of the fixed part of this record in bytes.
            pub const fn size() -> usize {
                #offset
            }

            #(#getters)*
        }

        impl<T: AsRef<[u8]> + AsMut<[u8]>> #name<T> {
            #(#setters)*
        }
    });

    f.into()
}
