//! End-to-end signing flows: new orders, fills, cancels and approvals.

use alloy_primitives::{Address, Bytes, U256};
use chrono::Utc;
use tracing::{debug, info};

use super::adapter::SignerAdapter;
use super::payloads::{
    beneficiary_fill_order_payload, cancel_all_payload, cancel_event_payload, cancel_order_payload,
    cancel_order_payload_v1, fill_order_payload, meta_transaction_payload, order_payload,
    permit_payload, salted_fill_order_payload, FillDetails, FillObject,
};
use crate::api::{encode_approve, ChainReader};
use crate::codec::OrderCodec;
use crate::config::{CancelShape, FillSigningStrategy, OrderSigningStrategy, ProtocolConfig};
use crate::hashing::{compute_multi_fill_hash, format_hash};
use crate::salt::random_salt;
use crate::types::{
    ApproveSpenderPayload, BaseTokenOrder, CancelAllDetails, CancelAllOrdersRequest,
    CancelEventDetails, CancelEventOrdersRequest, CancelIntent, CancelOrdersDetails,
    CancelOrdersDetailsV1, CancelOrdersRequest, CancelOrdersRequestV1, CancelRequest,
    ContractOrder, FillIntent, FillOrdersRequest, LegacyOrder, MetaTransactionDetails, NewOrder,
    OrderSchema, PermitDetails, SignedOrder, SignedPermit,
};
use crate::validation::{
    parse_address, parse_hash, parse_uint, validate_fill_metadata, validate_new_order,
    validate_signed_order, validate_taker_amounts,
};
use crate::{Error, Result};

fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Signs orders, fills, cancels and approvals for one account on one deployment.
pub struct OrderSigner<S> {
    config: ProtocolConfig,
    codec: OrderCodec,
    signer: S,
}

impl<S: SignerAdapter> OrderSigner<S> {
    pub fn new(config: ProtocolConfig, signer: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            codec: OrderCodec::new(config.order_schema()),
            config,
            signer,
        })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn codec(&self) -> OrderCodec {
        self.codec
    }

    /// Fail if the chain reader is connected to a different chain.
    pub async fn verify_chain<C: ChainReader + ?Sized>(&self, chain: &C) -> Result<()> {
        let chain_id = chain.chain_id().await?;
        if chain_id != self.config.chain_id {
            return Err(Error::Config {
                message: format!(
                    "chain reader is on chain {} but deployment is on chain {}",
                    chain_id, self.config.chain_id
                ),
            });
        }
        Ok(())
    }

    /// Build the canonical maker order for `order` with the given salt.
    pub fn build_order(&self, order: &NewOrder, salt: U256) -> Result<ContractOrder> {
        let market_hash = parse_hash(&order.market_hash)?;
        let total_bet_size = parse_uint("totalBetSize", &order.total_bet_size)?;
        let percentage_odds = parse_uint("percentageOdds", &order.percentage_odds)?;
        let expiry = U256::from(order.expiry);
        let maker = self.address();
        let executor = self.config.executor_address;

        match self.codec.schema() {
            OrderSchema::BaseToken => {
                let base_token = order
                    .base_token
                    .as_deref()
                    .ok_or_else(|| Error::schema("baseToken undefined or malformed."))
                    .and_then(parse_address)?;
                Ok(ContractOrder::BaseToken(BaseTokenOrder {
                    market_hash,
                    base_token,
                    total_bet_size,
                    percentage_odds,
                    expiry,
                    salt,
                    maker,
                    executor,
                    is_maker_betting_outcome_one: order.is_maker_betting_outcome_one,
                }))
            }
            OrderSchema::LegacyRelayerFee => {
                let relayer = self.config.relayer_address.ok_or_else(|| Error::Config {
                    message: "relayer_address is required for legacy relayer-fee orders"
                        .to_string(),
                })?;
                Ok(ContractOrder::Legacy(LegacyOrder {
                    market_hash,
                    maker,
                    total_bet_size,
                    percentage_odds,
                    expiry,
                    relayer,
                    relayer_maker_fee: self.config.relayer_maker_fee,
                    relayer_taker_fee: self.config.relayer_taker_fee,
                    executor,
                    salt,
                    is_maker_betting_outcome_one: order.is_maker_betting_outcome_one,
                }))
            }
        }
    }

    /// Maker signature over a canonical order, using the deployment's strategy.
    pub async fn sign_order(&self, order: &ContractOrder) -> Result<String> {
        match self.config.version.order_signing() {
            OrderSigningStrategy::PersonalMessage => self.signer.sign_hash(order.order_hash()).await,
            OrderSigningStrategy::TypedData => {
                let ContractOrder::BaseToken(order) = order else {
                    return Err(Error::schema("typed-data order signing needs a base-token order"));
                };
                let domain = self.config.fill_domain().ok_or_else(|| Error::Config {
                    message: format!("{} has no fill domain", self.config.version),
                })?;
                let payload = order_payload(order.clone(), domain).to_payload()?;
                self.signer.sign_typed_data(&payload).await
            }
        }
    }

    /// Validate, salt, hash and sign a new maker order.
    pub async fn new_order(&self, order: NewOrder) -> Result<SignedOrder> {
        debug!(market_hash = %order.market_hash, "new_order");
        validate_new_order(&order, unix_now())?;

        let canonical = self.build_order(&order, random_salt())?;
        let signature = self.sign_order(&canonical).await?;
        let wire = self.codec.to_wire(&canonical, order.expiry)?;

        let signed = SignedOrder::new(wire, signature);
        debug!(
            order_hash = %format_hash(&canonical.order_hash()),
            signature = %signed.signature(),
            "New signed order"
        );
        Ok(signed)
    }

    /// Sign several orders; the first failure aborts the batch.
    pub async fn new_orders(&self, orders: Vec<NewOrder>) -> Result<Vec<SignedOrder>> {
        let mut signed = Vec::with_capacity(orders.len());
        for order in orders {
            signed.push(self.new_order(order).await?);
        }
        info!(count = signed.len(), "Signed new orders");
        Ok(signed)
    }

    fn fill_domain_version(&self) -> Result<&'static str> {
        self.config
            .version
            .fill_domain_version()
            .ok_or_else(|| Error::Config {
                message: format!("{} has no fill domain", self.config.version),
            })
    }

    /// Validate and sign a taker fill of one or more maker orders.
    pub async fn fill_orders(&self, intent: FillIntent) -> Result<FillOrdersRequest> {
        debug!(orders = intent.orders.len(), "fill_orders");
        let now = unix_now();
        for order in &intent.orders {
            validate_signed_order(order.order(), order.signature(), now)?;
        }
        if let Some(affiliate) = &intent.affiliate_address {
            parse_address(affiliate).map_err(|_| Error::schema("Affiliate address malformed."))?;
        }
        validate_fill_metadata(&intent.metadata)?;
        validate_taker_amounts(intent.orders.len(), &intent.taker_amounts)?;

        let canonical = intent
            .orders
            .iter()
            .map(|order| self.codec.to_canonical(order.order()))
            .collect::<Result<Vec<_>>>()?;
        let order_hashes: Vec<String> = canonical
            .iter()
            .map(|order| format_hash(&order.order_hash()))
            .collect();
        let taker_amounts = intent
            .taker_amounts
            .iter()
            .map(|amount| parse_uint("takerAmounts", amount))
            .collect::<Result<Vec<_>>>()?;

        let strategy = self.config.version.fill_signing();
        let beneficiary = match strategy {
            FillSigningStrategy::TypedDataWithBeneficiary | FillSigningStrategy::SaltedTypedData => {
                Some(match &intent.beneficiary {
                    Some(beneficiary) => parse_address(beneficiary)?,
                    None => Address::ZERO,
                })
            }
            _ => None,
        };

        let taker_sig = match strategy {
            FillSigningStrategy::ChainedHash => {
                let orders = canonical
                    .into_iter()
                    .map(|order| match order {
                        ContractOrder::Legacy(order) => Ok(order),
                        ContractOrder::BaseToken(_) => {
                            Err(Error::schema("chained fill hashes need legacy orders"))
                        }
                    })
                    .collect::<Result<Vec<_>>>()?;
                let submitter_fee = intent
                    .submitter_fee
                    .as_deref()
                    .map(|fee| parse_uint("submitterFee", fee))
                    .transpose()?;
                let fill_hash = compute_multi_fill_hash(
                    &orders,
                    &taker_amounts,
                    intent.fill_salt(),
                    submitter_fee,
                )?;
                debug!(fill_hash = %format_hash(&fill_hash), "Chained fill hash");
                self.signer.sign_hash(fill_hash).await?
            }
            FillSigningStrategy::TypedData
            | FillSigningStrategy::TypedDataWithBeneficiary
            | FillSigningStrategy::SaltedTypedData => {
                let orders = canonical
                    .into_iter()
                    .map(|order| match order {
                        ContractOrder::BaseToken(order) => Ok(order),
                        ContractOrder::Legacy(_) => {
                            Err(Error::schema("typed-data fills need base-token orders"))
                        }
                    })
                    .collect::<Result<Vec<_>>>()?;
                let maker_sigs = intent
                    .orders
                    .iter()
                    .map(|order| {
                        order
                            .signature()
                            .parse::<Bytes>()
                            .map_err(|_| Error::schema("signature is not a valid hex string."))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let fills = FillObject {
                    orders,
                    maker_sigs,
                    taker_amounts,
                    fill_salt: intent.fill_salt(),
                };
                let metadata = intent.metadata.clone();
                let version = self.fill_domain_version()?;
                let (chain_id, verifying_contract) =
                    (self.config.chain_id, self.config.fill_hasher_address);

                let payload = match (strategy, beneficiary) {
                    (FillSigningStrategy::TypedDataWithBeneficiary, Some(beneficiary)) => {
                        beneficiary_fill_order_payload(
                            FillDetails {
                                metadata,
                                fills: fills.with_beneficiary(beneficiary),
                            },
                            version,
                            chain_id,
                            verifying_contract,
                        )
                        .to_payload()?
                    }
                    (FillSigningStrategy::SaltedTypedData, Some(beneficiary)) => {
                        salted_fill_order_payload(
                            FillDetails {
                                metadata,
                                fills: fills.with_beneficiary(beneficiary),
                            },
                            version,
                            chain_id,
                            verifying_contract,
                        )
                        .to_payload()?
                    }
                    _ => fill_order_payload(
                        FillDetails { metadata, fills },
                        version,
                        chain_id,
                        verifying_contract,
                    )
                    .to_payload()?,
                };
                debug!(signing_hash = %format_hash(&payload.signing_hash()), "Fill payload");
                self.signer.sign_typed_data(&payload).await?
            }
        };

        let fill_salt = intent.fill_salt().to_string();
        let request = FillOrdersRequest {
            order_hashes,
            taker_amounts: intent.taker_amounts,
            taker: self.address().to_checksum(None),
            taker_sig,
            fill_salt,
            metadata: intent.metadata,
            affiliate_address: intent.affiliate_address,
            approve_proxy_payload: intent.approve_proxy_payload,
            beneficiary: beneficiary.map(|b| b.to_checksum(None)),
        };
        debug!(order_hashes = ?request.order_hashes, "Fill request");
        Ok(request)
    }

    /// Cancel specific orders, in the deployment's cancel shape.
    ///
    /// `message` only appears in the early shape and defaults to `"N/A"`.
    pub async fn cancel_orders(
        &self,
        order_hashes: Vec<String>,
        message: Option<String>,
    ) -> Result<CancelRequest> {
        debug!(orders = order_hashes.len(), "cancel_orders");
        if order_hashes.is_empty() {
            return Err(Error::schema("orderHashes is empty"));
        }
        if order_hashes.iter().any(|hash| parse_hash(hash).is_err()) {
            return Err(Error::schema("orderHashes has some invalid order hashes."));
        }

        let request = match self.config.version.cancel_shape() {
            CancelShape::EarlyMessage => {
                let details = CancelOrdersDetailsV1 {
                    message: message.unwrap_or_else(|| "N/A".to_string()),
                    orders: order_hashes,
                };
                let payload = cancel_order_payload_v1(details, self.config.chain_id);
                let cancel_signature = self.signer.sign_typed_data(&payload.to_payload()?).await?;
                CancelRequest::OrdersV1(CancelOrdersRequestV1 {
                    message: payload.message.message,
                    orders: payload.message.orders,
                    cancel_signature,
                })
            }
            CancelShape::Salted => {
                let details = CancelOrdersDetails::fresh(order_hashes, unix_now());
                let payload = cancel_order_payload(details, self.config.chain_id);
                let signature = self.signer.sign_typed_data(&payload.to_payload()?).await?;
                let details = payload.message;
                CancelRequest::Orders(CancelOrdersRequest {
                    order_hashes: details.order_hashes,
                    salt: format_hash(&details.salt),
                    timestamp: details.timestamp,
                    signature,
                    maker: self.address().to_checksum(None),
                })
            }
        };
        debug!(request = ?request, "Cancel request");
        Ok(request)
    }

    /// Cancel every open order of this account.
    pub async fn cancel_all_orders(&self) -> Result<CancelAllOrdersRequest> {
        debug!("cancel_all_orders");
        let payload = cancel_all_payload(CancelAllDetails::fresh(unix_now()), self.config.chain_id);
        let signature = self.signer.sign_typed_data(&payload.to_payload()?).await?;

        Ok(CancelAllOrdersRequest {
            salt: format_hash(&payload.message.salt),
            timestamp: payload.message.timestamp,
            signature,
            maker: self.address().to_checksum(None),
        })
    }

    /// Cancel every open order of this account on one event.
    pub async fn cancel_event_orders(&self, sportx_event_id: &str) -> Result<CancelEventOrdersRequest> {
        debug!(sportx_event_id, "cancel_event_orders");
        if sportx_event_id.trim().is_empty() {
            return Err(Error::schema("sportXEventId is empty"));
        }
        let details = CancelEventDetails::fresh(sportx_event_id, unix_now());
        let payload = cancel_event_payload(details, self.config.chain_id);
        let signature = self.signer.sign_typed_data(&payload.to_payload()?).await?;

        let details = payload.message;
        Ok(CancelEventOrdersRequest {
            sportx_event_id: details.sportx_event_id,
            salt: format_hash(&details.salt),
            timestamp: details.timestamp,
            signature,
            maker: self.address().to_checksum(None),
        })
    }

    /// Sign any cancellation.
    pub async fn cancel(&self, intent: CancelIntent) -> Result<CancelRequest> {
        match intent {
            CancelIntent::ByHashes {
                order_hashes,
                message,
            } => self.cancel_orders(order_hashes, message).await,
            CancelIntent::All => Ok(CancelRequest::All(self.cancel_all_orders().await?)),
            CancelIntent::Event { sportx_event_id } => Ok(CancelRequest::Event(
                self.cancel_event_orders(&sportx_event_id).await?,
            )),
        }
    }

    /// Non-expiring DAI-style permit letting the token transfer proxy move
    /// this account's tokens.
    pub async fn approve_proxy_permit<C: ChainReader + ?Sized>(
        &self,
        chain: &C,
        token: Address,
        token_version: &str,
        nonce_override: Option<U256>,
    ) -> Result<SignedPermit> {
        let holder = self.address();
        debug!(token = %token, "approve_proxy_permit");

        let token_name = chain.token_name(token).await?;
        let nonce = match nonce_override {
            Some(nonce) => nonce,
            None => chain.permit_nonce(token, holder).await?,
        };

        let details = PermitDetails {
            holder,
            spender: self.config.token_transfer_proxy,
            nonce,
            expiry: 0,
            allowed: true,
        };
        let payload = permit_payload(
            details,
            token_name,
            token_version.to_string(),
            self.config.chain_id,
            token,
        );
        let signature = self.signer.sign_typed_data(&payload.to_payload()?).await?;

        let details = payload.message;
        let permit = SignedPermit {
            holder: details.holder.to_checksum(None),
            spender: details.spender.to_checksum(None),
            nonce: details.nonce.to_string(),
            expiry: details.expiry,
            allowed: details.allowed,
            signature,
        };
        debug!(nonce = %permit.nonce, "Signed permit");
        Ok(permit)
    }

    /// Meta-transaction approving the token transfer proxy for `amount`.
    pub async fn approve_proxy_meta_transaction<C: ChainReader + ?Sized>(
        &self,
        chain: &C,
        token: Address,
        amount: U256,
    ) -> Result<ApproveSpenderPayload> {
        let owner = self.address();
        let spender = self.config.token_transfer_proxy;
        debug!(token = %token, amount = %amount, "approve_proxy_meta_transaction");

        let token_name = chain.token_name(token).await?;
        let nonce = chain.approval_nonce(token, owner).await?;

        let details = MetaTransactionDetails {
            nonce,
            from: owner,
            function_signature: encode_approve(spender, amount),
        };
        let payload = meta_transaction_payload(details, token_name, token, self.config.chain_id);
        let signature = self.signer.sign_typed_data(&payload.to_payload()?).await?;

        let approval = ApproveSpenderPayload {
            owner: owner.to_checksum(None),
            spender: spender.to_checksum(None),
            token_address: token.to_checksum(None),
            amount: amount.to_string(),
            signature,
        };
        debug!(approval = ?approval, "Signed approval");
        Ok(approval)
    }
}

impl<S: SignerAdapter> std::fmt::Debug for OrderSigner<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSigner")
            .field("address", &self.address().to_checksum(None))
            .field("version", &self.config.version)
            .field("chain_id", &self.config.chain_id)
            .finish()
    }
}
